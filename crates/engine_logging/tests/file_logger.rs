use std::fs;

use engine_logging::{engine_debug, engine_info, engine_warn};
use log::LevelFilter;

// One test per binary: the global logger can only be installed once.
#[test]
fn file_logger_writes_at_and_above_level() {
    let dir = tempfile::TempDir::new().unwrap();
    let log_file = dir.path().join("blog_pdf.log");
    fs::write(&log_file, "stale line from an earlier run\n").unwrap();

    engine_logging::initialize(&log_file, LevelFilter::Info);
    engine_info!("created {}", "2024-03-07_Hello.pdf");
    engine_warn!("post {} failed", "https://site/blog/p2.html");
    engine_debug!("below the configured level");
    log::logger().flush();

    let written = fs::read_to_string(&log_file).unwrap();
    assert!(!written.contains("stale line"), "{written}");
    assert!(written.contains("created 2024-03-07_Hello.pdf"), "{written}");
    assert!(written.contains("post https://site/blog/p2.html failed"), "{written}");
    assert!(!written.contains("below the configured level"), "{written}");
}
