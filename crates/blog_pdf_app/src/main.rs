mod console;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use blog_pdf_core::{render_summary, RULE_WIDTH};
use blog_pdf_engine::{Pipeline, PipelineConfig, Renderer, WeasyPrintRenderer};
use engine_logging::{engine_error, engine_info};
use log::LevelFilter;

use crate::console::ConsoleProgress;

const LOG_FILE: &str = "blog_pdf.log";

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    engine_logging::initialize(Path::new(LOG_FILE), LevelFilter::Info);

    let rule = "=".repeat(RULE_WIDTH);
    println!("{rule}");
    println!("Geohot Blog Downloader");
    println!("{rule}");

    let renderer = WeasyPrintRenderer::detect();
    if renderer.is_none() {
        println!("Warning: weasyprint not installed. PDFs cannot be created until it is on PATH.");
    }
    let renderer = renderer.map(|r| Arc::new(r) as Arc<dyn Renderer>);

    let config = PipelineConfig::default();
    engine_info!(
        "starting run: base={} output={:?}",
        config.base_url,
        config.output_dir
    );
    let pipeline =
        Pipeline::with_http(config, renderer).context("cannot set up the HTTP client")?;

    let report = match pipeline.run(&ConsoleProgress::default()).await {
        Ok(report) => report,
        Err(err) => {
            engine_error!("run aborted: {}", err);
            println!("\n✗ Fatal error: {err}");
            return Err(err).context("blog download aborted");
        }
    };

    if report.links.is_empty() {
        println!("\nNo blog posts found!");
        return Ok(());
    }

    println!();
    print!("{}", render_summary(&report.tally, report.pdfs_in_output));
    Ok(())
}
