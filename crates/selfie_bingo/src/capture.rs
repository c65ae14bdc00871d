//! Photo capture collaborator.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use derive_getters::Getters;
use derive_new::new;
use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use selfie_bingo_board::Position;
use std::path::PathBuf;
use tracing::{debug, info, instrument};

/// Why a capture produced no photo.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum CaptureError {
    /// The user backed out of the camera.
    #[display("Camera cancelled.")]
    Cancelled,

    /// The picker closed without a selection.
    #[display("no image selected")]
    NoImageSelected,

    /// The device has no camera.
    #[display("no camera available")]
    Unavailable,

    /// The device reported a failure.
    #[display("{}", _0)]
    Failed(String),
}

impl std::error::Error for CaptureError {}

impl CaptureError {
    /// Classifies a failure message reported by the host camera.
    pub fn from_message(message: &str) -> Self {
        match message {
            "Camera cancelled." => CaptureError::Cancelled,
            "no image selected" => CaptureError::NoImageSelected,
            other => CaptureError::Failed(other.to_string()),
        }
    }

    /// True for user-initiated cancellations, which are ignored silently.
    pub fn is_user_cancel(&self) -> bool {
        matches!(self, CaptureError::Cancelled | CaptureError::NoImageSelected)
    }
}

/// An encoded photo ready to persist.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct CapturedPhoto {
    /// `data:` URL of the photo.
    data_url: String,
}

impl CapturedPhoto {
    /// Wraps a base64 JPEG payload as returned by device cameras.
    pub fn from_jpeg_base64(payload: &str) -> Self {
        Self::new(format!("data:image/jpeg;base64,{}", payload))
    }
}

/// Source of tile photos.
#[async_trait::async_trait]
pub trait PhotoCapture: Send + Sync {
    /// Takes a photo for the tile at `position`.
    async fn capture(&self, position: Position) -> Result<CapturedPhoto, CaptureError>;
}

/// Bounding size and quality for captured photos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, new)]
pub struct CaptureTarget {
    /// Maximum width.
    width: u32,
    /// Maximum height.
    height: u32,
    /// JPEG quality (1-100).
    quality: u8,
}

impl Default for CaptureTarget {
    fn default() -> Self {
        Self::new(200, 200, 80)
    }
}

impl CaptureTarget {
    /// Fits `image` inside the target box and encodes it as a JPEG data URL.
    #[instrument(skip(image), fields(width = image.width(), height = image.height()))]
    pub fn encode(&self, image: &DynamicImage) -> Result<CapturedPhoto, CaptureError> {
        let resized = image.resize(self.width, self.height, FilterType::Lanczos3);
        let mut jpeg = Vec::new();
        DynamicImage::ImageRgb8(resized.to_rgb8())
            .write_with_encoder(JpegEncoder::new_with_quality(&mut jpeg, self.quality))
            .map_err(|e| CaptureError::Failed(format!("Failed to encode photo: {}", e)))?;
        debug!(bytes = jpeg.len(), "Encoded photo");
        Ok(CapturedPhoto::from_jpeg_base64(&STANDARD.encode(&jpeg)))
    }
}

/// Capture that reads a photo from an image file.
///
/// With no path the capture reports [`CaptureError::NoImageSelected`].
#[derive(Debug, Clone)]
pub struct FileCapture {
    path: Option<PathBuf>,
    target: CaptureTarget,
}

impl FileCapture {
    /// Creates a file capture.
    pub fn new(path: Option<PathBuf>, target: CaptureTarget) -> Self {
        Self { path, target }
    }
}

#[async_trait::async_trait]
impl PhotoCapture for FileCapture {
    #[instrument(skip(self), fields(path = ?self.path))]
    async fn capture(&self, position: Position) -> Result<CapturedPhoto, CaptureError> {
        let Some(path) = &self.path else {
            return Err(CaptureError::NoImageSelected);
        };

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| CaptureError::Failed(format!("{}: {}", path.display(), e)))?;
        let target = self.target;
        let photo = tokio::task::spawn_blocking(move || {
            let decoded = image::load_from_memory(&bytes)
                .map_err(|e| CaptureError::Failed(format!("Unreadable image: {}", e)))?;
            target.encode(&decoded)
        })
        .await
        .map_err(|e| CaptureError::Failed(e.to_string()))??;

        info!(tile = position.number(), "Photo captured from file");
        Ok(photo)
    }
}
