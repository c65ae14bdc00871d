//! Share/export collaborator.

use crate::compositor::ComposedImage;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Receives the composed image and caption.
///
/// Failures are logged by the caller and never retried.
#[async_trait::async_trait]
pub trait ShareTarget: Send + Sync {
    /// Shares one composed image with its caption.
    async fn share(&self, caption: &str, image: &ComposedImage) -> anyhow::Result<()>;
}

/// Writes `bingo.png` and `bingo.txt` into a directory.
#[derive(Debug, Clone)]
pub struct FileShareTarget {
    output_dir: PathBuf,
}

impl FileShareTarget {
    /// Creates a target writing into `output_dir`.
    #[instrument(skip(output_dir), fields(output_dir = %output_dir.as_ref().display()))]
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    /// Path of the written image.
    pub fn image_path(&self) -> PathBuf {
        self.output_dir.join("bingo.png")
    }

    /// Path of the written caption.
    pub fn caption_path(&self) -> PathBuf {
        self.output_dir.join("bingo.txt")
    }
}

#[async_trait::async_trait]
impl ShareTarget for FileShareTarget {
    #[instrument(skip(self, image), fields(bytes = image.png().len()))]
    async fn share(&self, caption: &str, image: &ComposedImage) -> anyhow::Result<()> {
        debug!(dir = %self.output_dir.display(), "Writing shared image");
        tokio::fs::create_dir_all(&self.output_dir).await?;
        tokio::fs::write(self.image_path(), image.png()).await?;
        tokio::fs::write(self.caption_path(), caption).await?;
        info!(path = %self.image_path().display(), "Shared image written");
        Ok(())
    }
}
