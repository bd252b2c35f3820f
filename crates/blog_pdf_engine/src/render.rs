use std::process::{ExitStatus, Stdio};

use engine_logging::{engine_debug, engine_info, engine_warn};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

pub const DEFAULT_RENDERER_PROGRAM: &str = "weasyprint";

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
    #[error("{program} produced no output")]
    EmptyOutput { program: String },
}

/// HTML to PDF capability. `base_url` resolves relative stylesheets and images.
#[async_trait::async_trait]
pub trait Renderer: Send + Sync {
    async fn render(&self, html: &str, base_url: &str) -> Result<Vec<u8>, RenderError>;
}

/// Renders through the WeasyPrint command line, streaming markup on stdin and
/// reading the PDF from stdout.
#[derive(Debug, Clone)]
pub struct WeasyPrintRenderer {
    program: String,
}

impl WeasyPrintRenderer {
    /// Probe for `weasyprint` on `PATH`.
    pub fn detect() -> Option<Self> {
        Self::detect_program(DEFAULT_RENDERER_PROGRAM)
    }

    /// Probe a specific executable with `--version`; `None` when it cannot be run.
    pub fn detect_program(program: &str) -> Option<Self> {
        let output = std::process::Command::new(program)
            .arg("--version")
            .stdin(Stdio::null())
            .output();
        match output {
            Ok(output) if output.status.success() => {
                let version = String::from_utf8_lossy(&output.stdout);
                engine_info!("renderer available: {}", version.trim());
                Some(Self {
                    program: program.to_string(),
                })
            }
            Ok(output) => {
                engine_warn!("{} --version exited with {}", program, output.status);
                None
            }
            Err(err) => {
                engine_warn!("renderer {} not found: {}", program, err);
                None
            }
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

#[async_trait::async_trait]
impl Renderer for WeasyPrintRenderer {
    async fn render(&self, html: &str, base_url: &str) -> Result<Vec<u8>, RenderError> {
        let spawn_err = |source| RenderError::Spawn {
            program: self.program.clone(),
            source,
        };

        engine_debug!("rendering {} bytes of markup for {}", html.len(), base_url);
        let mut child = Command::new(&self.program)
            .arg("--quiet")
            .arg("--base-url")
            .arg(base_url)
            .arg("-")
            .arg("-")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(spawn_err)?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(html.as_bytes()).await.map_err(spawn_err)?;
            stdin.shutdown().await.map_err(spawn_err)?;
        }

        let output = child.wait_with_output().await.map_err(spawn_err)?;
        if !output.status.success() {
            return Err(RenderError::Failed {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        if output.stdout.is_empty() {
            return Err(RenderError::EmptyOutput {
                program: self.program.clone(),
            });
        }
        Ok(output.stdout)
    }
}
