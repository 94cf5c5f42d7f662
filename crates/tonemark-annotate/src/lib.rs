//! tonemark-annotate: multi-region mask annotation engine (sans-IO).
//!
//! Lets a host application mark hair, skin, and hand regions on a
//! photo by painting freehand strokes. Pointer events flow through the
//! coordinate mapper into the brush, which stamps fixed-radius discs
//! into per-region binary masks and mirrors them onto a live composite
//! preview. A step workflow gates which region is paintable and when
//! the annotation may be submitted for analysis.
//!
//! This crate has **no I/O dependencies** — it operates on in-memory
//! byte slices and raster buffers. Payload serialization lives in
//! `tonemark-export` and transport in `tonemark-client`.

pub mod brush;
pub mod composite;
pub mod coords;
pub mod handle;
pub mod session;
pub mod store;
pub mod types;
pub mod workflow;

pub use handle::ImageHandle;
pub use session::{AnnotationSession, LoadOutcome, LoadToken, SubmitError};
pub use store::RegionMaskStore;
pub use types::{
    AnnotateConfig, AnnotateError, Dimensions, DisplayBox, GrayImage, Point, Region, RgbaImage,
};
pub use workflow::{Workflow, WorkflowError};
