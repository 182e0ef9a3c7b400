//! # PDF Rendering
//!
//! PDF export shells out to `wkhtmltopdf`. The HTML input and the PDF output
//! both go through a private temp directory that is removed afterwards.

use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;

/// Longest a single conversion may run before the renderer is killed
const RENDER_TIMEOUT: Duration = Duration::from_secs(60);

/// A4 with 0.75in margins, UTF-8, no outline, local assets allowed
const PDF_OPTIONS: &[&str] = &[
    "--quiet",
    "--page-size",
    "A4",
    "--margin-top",
    "0.75in",
    "--margin-right",
    "0.75in",
    "--margin-bottom",
    "0.75in",
    "--margin-left",
    "0.75in",
    "--encoding",
    "UTF-8",
    "--no-outline",
    "--enable-local-file-access",
];

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("PDF renderer '{}' is not installed", .0.display())]
    RendererMissing(PathBuf),

    #[error("PDF renderer exited with {status}: {stderr}")]
    RendererFailed { status: ExitStatus, stderr: String },

    #[error("PDF renderer did not finish within {0:?}")]
    TimedOut(Duration),

    #[error("PDF export I/O failed")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct PdfRenderer {
    binary: PathBuf,
    timeout: Duration,
}

impl PdfRenderer {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            timeout: RENDER_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Render a complete HTML document to PDF bytes
    pub async fn render(&self, html: &str) -> Result<Vec<u8>, PdfError> {
        let workdir = tempfile::tempdir()?;
        let input = workdir.path().join("document.html");
        let output = workdir.path().join("document.pdf");
        tokio::fs::write(&input, html).await?;

        tracing::debug!("Running {} on {}", self.binary.display(), input.display());
        let conversion = Command::new(&self.binary)
            .args(PDF_OPTIONS)
            .arg(&input)
            .arg(&output)
            .kill_on_drop(true)
            .output();
        let result = tokio::time::timeout(self.timeout, conversion)
            .await
            .map_err(|_| PdfError::TimedOut(self.timeout))?;

        let finished = match result {
            Ok(finished) => finished,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(PdfError::RendererMissing(self.binary.clone()));
            }
            Err(e) => return Err(e.into()),
        };

        if !finished.status.success() {
            return Err(PdfError::RendererFailed {
                status: finished.status,
                stderr: String::from_utf8_lossy(&finished.stderr).trim().to_string(),
            });
        }

        let pdf = tokio::fs::read(&output).await?;
        tracing::info!("Rendered PDF of {} bytes", pdf.len());
        Ok(pdf)
    }
}
