//! tonemark-export: analysis payload serializer (sans-IO).
//!
//! Converts an annotation session's image and non-empty region masks
//! into the ordered multipart part list the analysis service expects.
//! No network or filesystem access — transport lives in
//! `tonemark-client`.

pub mod payload;

pub use payload::{
    ExportError, ExportPayload, IMAGE_PART, PayloadPart, REGION_TYPE_MULTI, REGION_TYPE_PART,
    build_payload,
};
