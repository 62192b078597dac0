//! Word-count based density rating for slides.

use crate::types::{DensityAnalysis, DensityRating, SlideRecord};

/// Word count at which the density score saturates.
const SATURATION_WORDS: f64 = 100.0;

/// Slides with more words than this are too dense.
const DENSE_THRESHOLD: usize = 150;

/// Slides with fewer words than this and no images are too sparse.
const SPARSE_THRESHOLD: usize = 20;

/// Rates how much text a slide carries.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlideDensityClassifier;

impl SlideDensityClassifier {
    /// Create a new classifier.
    pub fn new() -> Self {
        Self
    }

    /// Classify a slide record. Depends only on its word, image and bullet counts.
    pub fn classify(&self, record: &SlideRecord) -> DensityAnalysis {
        let rating = rate(record.word_count, record.images_count);

        DensityAnalysis {
            word_count: record.word_count,
            bullet_count: record.bullets.len(),
            image_count: record.images_count,
            text_density_score: density_score(record.word_count),
            density_rating: rating,
            recommendation: recommendation(rating).to_string(),
        }
    }
}

/// Linear 0-100 score that saturates at 100 words.
pub fn density_score(word_count: usize) -> f64 {
    (word_count as f64 / SATURATION_WORDS).min(1.0) * 100.0
}

/// Rate a slide. The dense check runs before the sparse check.
pub fn rate(word_count: usize, images_count: usize) -> DensityRating {
    if word_count > DENSE_THRESHOLD {
        DensityRating::TooDense
    } else if word_count < SPARSE_THRESHOLD && images_count == 0 {
        DensityRating::TooSparse
    } else {
        DensityRating::Optimal
    }
}

/// Fixed advice for a rating.
pub fn recommendation(rating: DensityRating) -> &'static str {
    match rating {
        DensityRating::Optimal => "Slide has good text-to-visual balance",
        DensityRating::TooDense => {
            "Too much text. Consider condensing or splitting into multiple slides."
        }
        DensityRating::TooSparse => "Too little content. Add more information or visuals.",
    }
}

/// Advice for a serialized rating label; empty for unknown labels.
pub fn recommendation_for_label(label: &str) -> &'static str {
    DensityRating::from_label(label)
        .map(recommendation)
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Bullet;

    fn record(word_count: usize, images_count: usize) -> SlideRecord {
        SlideRecord {
            slide_number: 1,
            word_count,
            images_count,
            ..Default::default()
        }
    }

    #[test]
    fn test_score_saturation() {
        assert_eq!(density_score(0), 0.0);
        assert_eq!(density_score(50), 50.0);
        assert_eq!(density_score(100), 100.0);
        assert_eq!(density_score(500), 100.0);
    }

    #[test]
    fn test_rating_bands_without_images() {
        for words in 0..=19 {
            assert_eq!(rate(words, 0), DensityRating::TooSparse, "{} words", words);
        }
        for words in 20..=150 {
            assert_eq!(rate(words, 0), DensityRating::Optimal, "{} words", words);
        }
        for words in [151, 200, 1000] {
            assert_eq!(rate(words, 0), DensityRating::TooDense, "{} words", words);
        }
    }

    #[test]
    fn test_images_prevent_sparse() {
        assert_eq!(rate(0, 1), DensityRating::Optimal);
        assert_eq!(rate(19, 3), DensityRating::Optimal);
        assert_eq!(rate(160, 1), DensityRating::TooDense);
    }

    #[test]
    fn test_classify() {
        let mut r = record(10, 0);
        r.bullets = vec![Bullet::new("a", 0), Bullet::new("b", 1)];

        let analysis = SlideDensityClassifier::new().classify(&r);

        assert_eq!(analysis.density_rating, DensityRating::TooSparse);
        assert_eq!(analysis.text_density_score, 10.0);
        assert_eq!(analysis.bullet_count, 2);
        assert_eq!(analysis.word_count, 10);
        assert_eq!(analysis.image_count, 0);
        assert_eq!(
            analysis.recommendation,
            "Too little content. Add more information or visuals."
        );
    }

    #[test]
    fn test_classify_is_deterministic() {
        let classifier = SlideDensityClassifier::new();
        let r = record(160, 1);
        assert_eq!(classifier.classify(&r), classifier.classify(&r));
    }

    #[test]
    fn test_recommendation_for_label() {
        assert_eq!(
            recommendation_for_label("optimal"),
            "Slide has good text-to-visual balance"
        );
        assert_eq!(
            recommendation_for_label("too_dense"),
            recommendation(DensityRating::TooDense)
        );
        assert_eq!(recommendation_for_label("balanced"), "");
    }
}
