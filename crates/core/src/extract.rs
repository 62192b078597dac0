//! Turns a slide's shape collection into a [`SlideRecord`].
//!
//! Shapes are visited in z-order. Each shape that carries non-blank text
//! contributes to the slide text, its run font sizes, and (depending on
//! its name label) the title, subtitle or bullet list. Every shape counts
//! toward `shapes_count` whether or not it has text.

use crate::types::{Bullet, ShapeDescriptor, SlideContent, SlideRecord, TextFrame};

/// Role of a shape, derived from its name label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShapeRole {
    Title,
    Subtitle,
    List,
    Body,
}

impl ShapeRole {
    /// Classify a shape name such as "Title 1" or "List Placeholder 3".
    ///
    /// The "title" check runs first, so "Subtitle 2" is a title shape. The
    /// "List" prefix is case-sensitive.
    fn from_name(name: &str) -> Self {
        let lower = name.to_lowercase();
        if lower.contains("title") {
            Self::Title
        } else if lower.contains("subtitle") {
            Self::Subtitle
        } else if name.starts_with("List") {
            Self::List
        } else {
            Self::Body
        }
    }
}

/// Extracts normalized slide records from shape collections.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShapeTextExtractor;

impl ShapeTextExtractor {
    /// Create a new extractor.
    pub fn new() -> Self {
        Self
    }

    /// Extract the record for one slide.
    ///
    /// Never fails: shapes without a text frame or name simply contribute
    /// nothing beyond their count.
    pub fn extract(&self, slide: &SlideContent, slide_number: usize) -> SlideRecord {
        let mut record = SlideRecord {
            slide_number,
            layout_name: slide.layout_name.clone(),
            shapes_count: slide.shapes.len(),
            ..Default::default()
        };
        let mut buffer = String::new();

        for shape in &slide.shapes {
            if shape.kind.is_picture() {
                record.images_count += 1;
            }
            self.apply_shape(shape, &mut record, &mut buffer);
        }

        record.text_content = buffer.trim().to_string();
        record.word_count = count_words(&record.text_content);

        log::debug!(
            "Slide {}: {} shapes, {} words, {} images",
            slide_number,
            record.shapes_count,
            record.word_count,
            record.images_count
        );

        record
    }

    /// Fold a single shape's text into the record under construction.
    fn apply_shape(&self, shape: &ShapeDescriptor, record: &mut SlideRecord, buffer: &mut String) {
        let text = match shape.text() {
            Some(text) if !text.trim().is_empty() => text,
            _ => return,
        };

        buffer.push_str(&text);
        buffer.push('\n');

        if let Some(frame) = &shape.text_frame {
            record.font_sizes.extend(font_sizes(frame));
        }

        match ShapeRole::from_name(shape.name()) {
            ShapeRole::Title => record.title = text,
            ShapeRole::Subtitle => record.subtitle = text,
            ShapeRole::List => {
                if let Some(frame) = &shape.text_frame {
                    record.bullets.extend(bullets(frame));
                }
            }
            ShapeRole::Body => {}
        }
    }
}

/// Non-blank paragraphs of a list shape, in order.
fn bullets(frame: &TextFrame) -> impl Iterator<Item = Bullet> + '_ {
    frame.paragraphs.iter().filter_map(|p| {
        let text = p.text();
        if text.trim().is_empty() {
            None
        } else {
            Some(Bullet::new(text, p.level))
        }
    })
}

/// Explicit run font sizes rounded to whole points. Runs that inherit
/// their size are skipped rather than reported as zero.
fn font_sizes(frame: &TextFrame) -> impl Iterator<Item = u32> + '_ {
    frame
        .runs()
        .filter_map(|r| r.font_size)
        .filter(|pt| pt.is_finite())
        .map(|pt| pt.round())
        .filter(|pt| *pt >= 1.0)
        .map(|pt| pt as u32)
}

/// Number of whitespace-separated tokens.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ShapeKind, TextParagraph, TextRun};

    fn text_shape(name: &str, lines: &[&str]) -> ShapeDescriptor {
        let paragraphs = lines
            .iter()
            .map(|l| TextParagraph::new(vec![TextRun::new(*l)], 0))
            .collect();
        ShapeDescriptor::new(ShapeKind::Placeholder)
            .with_name(name)
            .with_text_frame(TextFrame::new(paragraphs))
    }

    fn slide(shapes: Vec<ShapeDescriptor>) -> SlideContent {
        SlideContent {
            layout_name: "Title and Content".to_string(),
            shapes,
        }
    }

    #[test]
    fn test_role_from_name() {
        assert_eq!(ShapeRole::from_name("Title 1"), ShapeRole::Title);
        assert_eq!(ShapeRole::from_name("TITLE"), ShapeRole::Title);
        assert_eq!(ShapeRole::from_name("Subtitle 2"), ShapeRole::Title);
        assert_eq!(ShapeRole::from_name("List Placeholder 1"), ShapeRole::List);
        assert_eq!(ShapeRole::from_name("list 1"), ShapeRole::Body);
        assert_eq!(ShapeRole::from_name("LIST 1"), ShapeRole::Body);
        assert_eq!(ShapeRole::from_name("Content Placeholder 2"), ShapeRole::Body);
        assert_eq!(ShapeRole::from_name("Playlist"), ShapeRole::Body);
        assert_eq!(ShapeRole::from_name(""), ShapeRole::Body);
    }

    #[test]
    fn test_title_and_text_content() {
        let extractor = ShapeTextExtractor::new();
        let record = extractor.extract(
            &slide(vec![
                text_shape("Title 1", &["Intro"]),
                text_shape("TextBox 3", &["Hello there", "second line"]),
            ]),
            1,
        );

        assert_eq!(record.slide_number, 1);
        assert_eq!(record.title, "Intro");
        assert_eq!(record.subtitle, "");
        assert_eq!(record.text_content, "Intro\nHello there\nsecond line");
        assert_eq!(record.word_count, 5);
        assert_eq!(record.layout_name, "Title and Content");
    }

    #[test]
    fn test_subtitle_shape_overwrites_title() {
        let extractor = ShapeTextExtractor::new();
        let record = extractor.extract(
            &slide(vec![
                text_shape("Title 1", &["Quarterly Review"]),
                text_shape("Subtitle 2", &["Q3 2024"]),
            ]),
            1,
        );

        assert_eq!(record.title, "Q3 2024");
        assert_eq!(record.subtitle, "");
        assert_eq!(record.text_content, "Quarterly Review\nQ3 2024");
    }

    #[test]
    fn test_lowercase_list_name_has_no_bullets() {
        let frame = TextFrame::new(vec![TextParagraph::new(vec![TextRun::new("Point A")], 0)]);
        let shape = ShapeDescriptor::new(ShapeKind::AutoShape)
            .with_name("list 1")
            .with_text_frame(frame);

        let record = ShapeTextExtractor::new().extract(&slide(vec![shape]), 1);

        assert!(record.bullets.is_empty());
        assert_eq!(record.text_content, "Point A");
    }

    #[test]
    fn test_last_title_wins() {
        let extractor = ShapeTextExtractor::new();
        let record = extractor.extract(
            &slide(vec![
                text_shape("Title 1", &["First"]),
                text_shape("Title 2", &["Second"]),
            ]),
            1,
        );

        assert_eq!(record.title, "Second");
    }

    #[test]
    fn test_bullet_extraction_skips_blank_paragraphs() {
        let frame = TextFrame::new(vec![
            TextParagraph::new(vec![TextRun::new("Point A")], 0),
            TextParagraph::new(vec![TextRun::new("")], 0),
            TextParagraph::new(vec![TextRun::new("Point B")], 1),
        ]);
        let list = ShapeDescriptor::new(ShapeKind::Placeholder)
            .with_name("List Placeholder 1")
            .with_text_frame(frame);

        let record = ShapeTextExtractor::new().extract(&slide(vec![list]), 1);

        assert_eq!(
            record.bullets,
            vec![Bullet::new("Point A", 0), Bullet::new("Point B", 1)]
        );
    }

    #[test]
    fn test_blank_shapes_counted_but_not_aggregated() {
        let record = ShapeTextExtractor::new().extract(
            &slide(vec![
                text_shape("Title 1", &["   "]),
                ShapeDescriptor::new(ShapeKind::Connector),
                text_shape("TextBox 2", &["Body"]),
            ]),
            3,
        );

        assert_eq!(record.shapes_count, 3);
        assert_eq!(record.title, "");
        assert_eq!(record.text_content, "Body");
        assert_eq!(record.word_count, 1);
    }

    #[test]
    fn test_pictures_counted() {
        let record = ShapeTextExtractor::new().extract(
            &slide(vec![
                ShapeDescriptor::new(ShapeKind::Picture).with_name("Picture 4"),
                ShapeDescriptor::new(ShapeKind::Picture),
                ShapeDescriptor::new(ShapeKind::GraphicFrame),
            ]),
            1,
        );

        assert_eq!(record.images_count, 2);
        assert_eq!(record.shapes_count, 3);
        assert_eq!(record.text_content, "");
        assert_eq!(record.word_count, 0);
    }

    #[test]
    fn test_font_sizes_skip_inherited_and_round() {
        let frame = TextFrame::new(vec![
            TextParagraph::new(
                vec![
                    TextRun::sized("Big ", 44.0),
                    TextRun::new("inherited "),
                    TextRun::sized("odd", 10.5),
                ],
                0,
            ),
            TextParagraph::new(vec![TextRun::sized("small", 11.4)], 0),
        ]);
        let shape = ShapeDescriptor::new(ShapeKind::AutoShape)
            .with_name("TextBox 1")
            .with_text_frame(frame);

        let record = ShapeTextExtractor::new().extract(&slide(vec![shape]), 1);

        assert_eq!(record.font_sizes, vec![44, 11, 11]);
    }

    #[test]
    fn test_missing_text_frame_does_not_abort() {
        let record = ShapeTextExtractor::new().extract(
            &slide(vec![
                ShapeDescriptor::new(ShapeKind::Placeholder).with_name("List Placeholder 2"),
                ShapeDescriptor::new(ShapeKind::Group),
                text_shape("Title 1", &["Still here"]),
            ]),
            2,
        );

        assert!(record.bullets.is_empty());
        assert_eq!(record.title, "Still here");
        assert_eq!(record.shapes_count, 3);
    }

    #[test]
    fn test_word_count_matches_text_content() {
        let record = ShapeTextExtractor::new().extract(
            &slide(vec![text_shape("TextBox 1", &["  one\ttwo  ", "", "three   four"])]),
            1,
        );

        assert_eq!(record.word_count, count_words(&record.text_content));
        assert_eq!(record.word_count, 4);
        assert!(!record.text_content.starts_with(' '));
    }
}
