//! Tile image loading.

use anyhow::{Context, anyhow, bail};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::DynamicImage;
use tracing::{debug, instrument};

/// Turns a stored image handle into pixels.
#[async_trait::async_trait]
pub trait ImageLoader: Send + Sync {
    /// Loads and decodes one image handle.
    async fn load(&self, image: &str) -> anyhow::Result<DynamicImage>;
}

/// Loads `data:<mime>;base64,<payload>` URLs or bare base64 payloads.
///
/// Decoding runs on the blocking pool so several tiles decode at once.
#[derive(Debug, Default, Clone, Copy)]
pub struct DataUrlLoader;

impl DataUrlLoader {
    /// Extracts the base64 payload from a handle.
    fn payload(image: &str) -> anyhow::Result<&str> {
        match image.trim().strip_prefix("data:") {
            Some(rest) => {
                let (meta, data) = rest
                    .split_once(',')
                    .ok_or_else(|| anyhow!("malformed data URL"))?;
                if !meta.ends_with(";base64") {
                    bail!("unsupported data URL encoding '{}'", meta);
                }
                Ok(data)
            }
            None => Ok(image.trim()),
        }
    }

    /// Decodes a handle synchronously.
    #[instrument(skip(image), fields(len = image.len()))]
    pub fn decode(image: &str) -> anyhow::Result<DynamicImage> {
        let payload: String = Self::payload(image)?
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        let bytes = STANDARD.decode(payload).context("invalid base64 payload")?;
        let decoded = image::load_from_memory(&bytes).context("unrecognised image data")?;
        debug!(width = decoded.width(), height = decoded.height(), "Decoded image");
        Ok(decoded)
    }
}

#[async_trait::async_trait]
impl ImageLoader for DataUrlLoader {
    async fn load(&self, image: &str) -> anyhow::Result<DynamicImage> {
        let owned = image.to_string();
        tokio::task::spawn_blocking(move || Self::decode(&owned)).await?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_variants() {
        assert_eq!(
            DataUrlLoader::payload("data:image/png;base64,AAAA").expect("payload"),
            "AAAA"
        );
        assert_eq!(DataUrlLoader::payload(" AAAA ").expect("payload"), "AAAA");
        assert!(DataUrlLoader::payload("data:image/png,AAAA").is_err());
        assert!(DataUrlLoader::payload("data:image/png;base64").is_err());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(DataUrlLoader::decode("data:image/png;base64,!!!").is_err());
        assert!(DataUrlLoader::decode("data:image/png;base64,AAAA").is_err());
    }
}
