//! The finished report.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{RenderError, RenderResult};

/// MIME type of every rendered report.
pub const SVG_MIME: &str = "image/svg+xml";

/// A rendered SVG document with its suggested filename.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    content: String,
    filename: String,
    width: f64,
    height: f64,
}

impl ReportDocument {
    pub(crate) fn new(content: String, filename: String, width: f64, height: f64) -> Self {
        Self {
            content,
            filename,
            width,
            height,
        }
    }

    /// SVG source text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Suggested filename, `krump-{preset}-{circuit}-{id}.svg`.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Always [`SVG_MIME`].
    pub fn mime(&self) -> &'static str {
        SVG_MIME
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// UTF-8 bytes of the document.
    pub fn as_bytes(&self) -> &[u8] {
        self.content.as_bytes()
    }

    /// Take ownership of the bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.content.into_bytes()
    }

    /// Write to `path`, creating parent directories.
    pub async fn write_to(&self, path: &Path) -> RenderResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| RenderError::Io(format!("{}: {e}", parent.display())))?;
        }
        tokio::fs::write(path, self.as_bytes())
            .await
            .map_err(|e| RenderError::Io(format!("{}: {e}", path.display())))?;
        info!("Wrote {} ({} bytes)", path.display(), self.content.len());
        Ok(())
    }

    /// Write into `dir` under the suggested filename and return the full path.
    pub async fn save_in(&self, dir: &Path) -> RenderResult<PathBuf> {
        let path = dir.join(&self.filename);
        self.write_to(&path).await?;
        Ok(path)
    }
}
