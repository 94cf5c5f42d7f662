//! Image handle: the decoded photo plus its verbatim source bytes.
//!
//! The upload collaborator delivers raw file bytes and a filename.
//! Decoding happens here; the original bytes are kept untouched so the
//! export step can forward the file exactly as uploaded.

use crate::types::{AnnotateError, Dimensions, RgbaImage};

/// An immutably loaded photo.
///
/// Holds both the decoded RGBA raster (for compositing) and the raw
/// file bytes (forwarded verbatim as the `image` export part).
#[derive(Debug, Clone)]
pub struct ImageHandle {
    bytes: Vec<u8>,
    filename: String,
    image: RgbaImage,
}

impl ImageHandle {
    /// Decode raw image bytes into a handle.
    ///
    /// Supports PNG, JPEG, BMP, and WebP (whatever the `image` crate
    /// can decode).
    ///
    /// # Errors
    ///
    /// Returns [`AnnotateError::EmptyInput`] if `bytes` is empty.
    /// Returns [`AnnotateError::ImageDecode`] if the format is
    /// unrecognized or the data is corrupt.
    pub fn decode(bytes: Vec<u8>, filename: impl Into<String>) -> Result<Self, AnnotateError> {
        if bytes.is_empty() {
            return Err(AnnotateError::EmptyInput);
        }

        let image = image::load_from_memory(&bytes)?.to_rgba8();
        Ok(Self {
            bytes,
            filename: filename.into(),
            image,
        })
    }

    /// The raw file bytes exactly as uploaded.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The source filename.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// The decoded RGBA photo.
    #[must_use]
    pub const fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Natural pixel dimensions of the decoded photo.
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.image.width(), self.image.height())
    }
}
