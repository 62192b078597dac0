//! Core domain types, slide extraction and density analysis
//! for PowerPoint review.

pub mod aggregate;
pub mod density;
pub mod error;
pub mod extract;
pub mod report;
pub mod store;
pub mod suggestions;
pub mod types;

pub use aggregate::{PresentationAggregator, PresentationSource};
pub use density::SlideDensityClassifier;
pub use error::{Error, Result};
pub use extract::ShapeTextExtractor;
pub use report::{analyze, assemble, text_summary, DeckStatistics};
pub use store::{InMemoryJobStore, JobId, JobStore};
pub use suggestions::parse_suggestions;
pub use types::{
    AnalyzedSlide, Bullet, CoreProperties, DensityAnalysis, DensityRating, ExtractedPresentation,
    PresentationAnalysis, PresentationMetadata, ShapeDescriptor, ShapeKind, SlideContent,
    SlideRecord, TextFrame, TextParagraph, TextRun,
};
