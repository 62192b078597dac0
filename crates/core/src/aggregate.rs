//! Walks an opened presentation and builds the ordered slide list and metadata.

use crate::extract::ShapeTextExtractor;
use crate::types::{CoreProperties, ExtractedPresentation, PresentationMetadata, SlideContent};

/// Placeholder title for presentations without one.
pub const DEFAULT_TITLE: &str = "Untitled";

/// Placeholder author for presentations without one.
pub const DEFAULT_AUTHOR: &str = "Unknown";

/// An opened presentation container.
///
/// Implemented by format backends; slides are returned in presentation order.
pub trait PresentationSource {
    /// Slides in presentation order.
    fn slides(&self) -> &[SlideContent];

    /// Document properties of the container.
    fn core_properties(&self) -> &CoreProperties;

    /// Number of slides in the presentation.
    fn slide_count(&self) -> usize {
        self.slides().len()
    }
}

/// Builds [`ExtractedPresentation`]s from presentation sources.
#[derive(Debug, Clone, Default)]
pub struct PresentationAggregator {
    extractor: ShapeTextExtractor,
}

impl PresentationAggregator {
    /// Create a new aggregator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract every slide, numbering them 1.. in source order.
    pub fn aggregate<S: PresentationSource + ?Sized>(&self, source: &S) -> ExtractedPresentation {
        let slides: Vec<_> = source
            .slides()
            .iter()
            .enumerate()
            .map(|(idx, slide)| self.extractor.extract(slide, idx + 1))
            .collect();

        let mut metadata = metadata_from(source.core_properties());
        metadata.total_slides = slides.len();

        log::info!("Extracted {} slides", slides.len());

        ExtractedPresentation { metadata, slides }
    }
}

/// Fill in presentation metadata, substituting placeholders for missing fields.
pub fn metadata_from(props: &CoreProperties) -> PresentationMetadata {
    PresentationMetadata {
        title: or_default(&props.title, DEFAULT_TITLE),
        author: or_default(&props.author, DEFAULT_AUTHOR),
        subject: or_default(&props.subject, ""),
        keywords: or_default(&props.keywords, ""),
        total_slides: 0,
        created: or_default(&props.created, ""),
        modified: or_default(&props.modified, ""),
    }
}

fn or_default(value: &Option<String>, default: &str) -> String {
    match value.as_deref() {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => default.to_string(),
    }
}
