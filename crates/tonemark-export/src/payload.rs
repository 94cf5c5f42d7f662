//! Transport payload assembly.
//!
//! Builds the ordered multipart part list for one analysis request:
//! the original photo bytes (verbatim), one losslessly-encoded PNG per
//! non-empty region mask, and the `region_type` tag. The payload is
//! pure data; `tonemark-client` turns it into an actual HTTP form.
//!
//! Encoding failure for any mask aborts the whole build — a partial
//! payload is never produced.

use image::ImageEncoder;
use tonemark_annotate::{GrayImage, ImageHandle, Region, RegionMaskStore};

/// Workflow-variant tag for the multi-region annotation flow.
pub const REGION_TYPE_MULTI: &str = "multi";

/// Part name carrying the original photo.
pub const IMAGE_PART: &str = "image";

/// Part name carrying the workflow-variant tag.
pub const REGION_TYPE_PART: &str = "region_type";

/// Errors that can occur while building a payload.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// A mask bitmap could not be PNG-encoded.
    #[error("failed to encode {region} mask: {source}")]
    MaskEncode {
        /// The region whose mask failed to encode.
        region: Region,
        /// The underlying encoder error.
        source: image::ImageError,
    },
}

/// One named entry of the multipart request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadPart {
    /// Form field name (`image`, `hair_mask`, `region_type`, ...).
    pub name: String,
    /// Filename for file parts; `None` for plain text parts.
    pub filename: Option<String>,
    /// MIME type of the part body.
    pub mime: &'static str,
    /// Part body.
    pub bytes: Vec<u8>,
}

/// The assembled analysis request body: an ordered list of parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPayload {
    parts: Vec<PayloadPart>,
}

impl ExportPayload {
    /// The parts in transmission order.
    #[must_use]
    pub fn parts(&self) -> &[PayloadPart] {
        &self.parts
    }

    /// Consume the payload, yielding the parts.
    #[must_use]
    pub fn into_parts(self) -> Vec<PayloadPart> {
        self.parts
    }

    /// Find a part by form field name.
    #[must_use]
    pub fn part(&self, name: &str) -> Option<&PayloadPart> {
        self.parts.iter().find(|p| p.name == name)
    }
}

/// Build the payload for one analysis request.
///
/// Parts, in order: `image` (the uploaded file, byte-for-byte), then
/// `<region>_mask` for every region with at least one brush
/// application (priority order), then `region_type` with `region_tag`.
/// Unpainted regions contribute no part at all.
///
/// # Errors
///
/// Returns [`ExportError::MaskEncode`] if any mask fails to encode;
/// no payload is produced in that case.
pub fn build_payload(
    handle: &ImageHandle,
    store: &RegionMaskStore,
    region_tag: &str,
) -> Result<ExportPayload, ExportError> {
    let mut parts = vec![PayloadPart {
        name: IMAGE_PART.to_owned(),
        filename: Some(handle.filename().to_owned()),
        mime: mime_for_filename(handle.filename()),
        bytes: handle.bytes().to_vec(),
    }];

    for (region, mask) in store.painted_masks() {
        let bytes = encode_mask_png(mask)
            .map_err(|source| ExportError::MaskEncode { region, source })?;
        parts.push(PayloadPart {
            name: format!("{region}_mask"),
            filename: Some(format!("{region}_mask.png")),
            mime: "image/png",
            bytes,
        });
    }

    parts.push(PayloadPart {
        name: REGION_TYPE_PART.to_owned(),
        filename: None,
        mime: "text/plain",
        bytes: region_tag.as_bytes().to_vec(),
    });

    Ok(ExportPayload { parts })
}

/// Encode a mask bitmap as 8-bit grayscale PNG.
fn encode_mask_png(mask: &GrayImage) -> Result<Vec<u8>, image::ImageError> {
    let mut png_bytes = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
    encoder.write_image(
        mask.as_raw(),
        mask.width(),
        mask.height(),
        image::ExtendedColorType::L8,
    )?;
    Ok(png_bytes)
}

/// MIME type for the original photo, guessed from its extension.
fn mime_for_filename(filename: &str) -> &'static str {
    let ext = filename
        .rsplit_once('.')
        .map_or("", |(_, ext)| ext)
        .to_ascii_lowercase();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}
