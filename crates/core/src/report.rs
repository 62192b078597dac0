//! Merges density verdicts into extracted slides and derives deck-level summaries.

use crate::aggregate::{PresentationAggregator, PresentationSource};
use crate::density::SlideDensityClassifier;
use crate::types::{AnalyzedSlide, PresentationAnalysis, SlideRecord};
use serde::{Deserialize, Serialize};

/// Attach a density verdict to every slide, keeping order and numbering.
pub fn assemble(slides: Vec<SlideRecord>) -> Vec<AnalyzedSlide> {
    let classifier = SlideDensityClassifier::new();

    slides
        .into_iter()
        .map(|slide| {
            let density_analysis = classifier.classify(&slide);
            AnalyzedSlide {
                slide,
                density_analysis,
            }
        })
        .collect()
}

/// Extract and classify every slide of a presentation.
pub fn analyze<S: PresentationSource + ?Sized>(source: &S) -> PresentationAnalysis {
    let extracted = PresentationAggregator::new().aggregate(source);

    PresentationAnalysis {
        metadata: extracted.metadata,
        slides: assemble(extracted.slides),
    }
}

/// Plain-text dump of every slide, used as input for reviewers.
///
/// # Example output
/// ```text
/// Slide 1:
/// Title: Intro
/// Intro
/// Welcome everyone
///
/// ```
pub fn text_summary<'a, I>(slides: I) -> String
where
    I: IntoIterator<Item = &'a SlideRecord>,
{
    let mut summary = String::new();

    for slide in slides {
        summary.push_str(&format!("Slide {}:\n", slide.slide_number));
        if !slide.title.is_empty() {
            summary.push_str(&format!("Title: {}\n", slide.title));
        }
        summary.push_str(&slide.text_content);
        summary.push_str("\n\n");
    }

    summary
}

/// Deck-wide counts and outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckStatistics {
    pub total_slides: usize,
    pub total_words: usize,
    /// Integer average, 0 for an empty deck.
    pub average_words_per_slide: usize,
    /// One "Slide N: title" line per slide.
    pub outline: Vec<String>,
}

impl DeckStatistics {
    /// Compute statistics over slide records.
    pub fn from_slides<'a, I>(slides: I) -> Self
    where
        I: IntoIterator<Item = &'a SlideRecord>,
    {
        let mut total_slides = 0;
        let mut total_words = 0;
        let mut outline = Vec::new();

        for slide in slides {
            total_slides += 1;
            total_words += slide.word_count;
            outline.push(format!("Slide {}: {}", slide.slide_number, slide.title));
        }

        let average_words_per_slide = if total_slides == 0 {
            0
        } else {
            total_words / total_slides
        };

        Self {
            total_slides,
            total_words,
            average_words_per_slide,
            outline,
        }
    }
}
