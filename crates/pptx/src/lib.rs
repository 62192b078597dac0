//! PPTX (Office Open XML) backend for slide review.
//!
//! Parses .pptx files, which are ZIP archives containing XML documents,
//! into the shape model used by `slidecheck-core`.

pub mod parser;
pub mod shapes;

pub use parser::{PptxParser, PptxPresentation};
pub use shapes::extract_shapes;
