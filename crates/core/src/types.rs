//! Domain types for shape input and extracted presentation content.

use serde::{Deserialize, Serialize};

/// Broad category of a shape on a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    /// Free-standing shape such as a text box or rectangle.
    #[default]
    AutoShape,
    /// Layout placeholder (title, body, subtitle...).
    Placeholder,
    /// Embedded picture.
    Picture,
    /// Group of nested shapes.
    Group,
    /// Table, chart or diagram frame.
    GraphicFrame,
    /// Connector line.
    Connector,
    /// Anything else found in the shape tree.
    Other,
}

impl ShapeKind {
    /// Whether this shape counts as an image.
    pub fn is_picture(self) -> bool {
        matches!(self, Self::Picture)
    }
}

/// A run of text with uniform formatting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,

    /// Explicit font size in points. None when inherited.
    pub font_size: Option<f64>,
}

impl TextRun {
    /// Create a run without an explicit font size.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font_size: None,
        }
    }

    /// Create a run with an explicit font size in points.
    pub fn sized(text: impl Into<String>, points: f64) -> Self {
        Self {
            text: text.into(),
            font_size: Some(points),
        }
    }
}

/// A paragraph inside a text frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextParagraph {
    pub runs: Vec<TextRun>,

    /// Nesting depth, 0 for top-level text.
    pub level: u32,
}

impl TextParagraph {
    /// Create a paragraph at the given level.
    pub fn new(runs: Vec<TextRun>, level: u32) -> Self {
        Self { runs, level }
    }

    /// Concatenated text of all runs.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// The text body of a shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextFrame {
    pub paragraphs: Vec<TextParagraph>,
}

impl TextFrame {
    /// Create a text frame from paragraphs.
    pub fn new(paragraphs: Vec<TextParagraph>) -> Self {
        Self { paragraphs }
    }

    /// Paragraph texts joined with newlines.
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(TextParagraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Iterate over every run in paragraph order.
    pub fn runs(&self) -> impl Iterator<Item = &TextRun> {
        self.paragraphs.iter().flat_map(|p| p.runs.iter())
    }
}

/// One shape as seen by the extractor.
///
/// Every optional capability is resolved when the descriptor is built, so
/// extraction never has to query the underlying document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShapeDescriptor {
    pub name: Option<String>,
    pub kind: ShapeKind,
    pub text_frame: Option<TextFrame>,
}

impl ShapeDescriptor {
    /// Create a shape without a name or text.
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            name: None,
            kind,
            text_frame: None,
        }
    }

    /// Set the shape's name label.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attach a text frame.
    pub fn with_text_frame(mut self, frame: TextFrame) -> Self {
        self.text_frame = Some(frame);
        self
    }

    /// Name label, empty when the shape has none.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Whether the shape carries a text frame.
    pub fn has_text_frame(&self) -> bool {
        self.text_frame.is_some()
    }

    /// Full text of the shape, if it can hold text.
    pub fn text(&self) -> Option<String> {
        self.text_frame.as_ref().map(TextFrame::text)
    }
}

/// The raw content of one slide: its layout label and shapes in z-order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlideContent {
    pub layout_name: String,
    pub shapes: Vec<ShapeDescriptor>,
}

impl SlideContent {
    /// Create an empty slide using the given layout.
    pub fn new(layout_name: impl Into<String>) -> Self {
        Self {
            layout_name: layout_name.into(),
            shapes: Vec::new(),
        }
    }

    /// Add a shape to the end of the shape list.
    pub fn add_shape(&mut self, shape: ShapeDescriptor) {
        self.shapes.push(shape);
    }
}

/// Document properties as stored in the container. Any field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoreProperties {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub keywords: Option<String>,
    pub created: Option<String>,
    pub modified: Option<String>,
}

/// A bullet point taken from a list shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bullet {
    pub text: String,
    pub level: u32,
}

impl Bullet {
    /// Create a bullet at the given nesting level.
    pub fn new(text: impl Into<String>, level: u32) -> Self {
        Self {
            text: text.into(),
            level,
        }
    }
}

/// Extracted data for a single slide.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlideRecord {
    /// 1-based position in the deck.
    pub slide_number: usize,
    pub title: String,
    pub subtitle: String,
    pub bullets: Vec<Bullet>,
    pub text_content: String,
    pub images_count: usize,
    pub shapes_count: usize,
    /// Explicit run font sizes in points, in encounter order.
    pub font_sizes: Vec<u32>,
    pub word_count: usize,
    pub layout_name: String,
}

/// Categorical text density of a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DensityRating {
    Optimal,
    TooDense,
    TooSparse,
}

impl DensityRating {
    /// Label used in serialized output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Optimal => "optimal",
            Self::TooDense => "too_dense",
            Self::TooSparse => "too_sparse",
        }
    }

    /// Parse a serialized label.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "optimal" => Some(Self::Optimal),
            "too_dense" => Some(Self::TooDense),
            "too_sparse" => Some(Self::TooSparse),
            _ => None,
        }
    }
}

impl std::fmt::Display for DensityRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Density verdict for one slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityAnalysis {
    pub word_count: usize,
    pub bullet_count: usize,
    pub image_count: usize,
    /// 0 to 100, saturating at 100 words.
    pub text_density_score: f64,
    pub density_rating: DensityRating,
    pub recommendation: String,
}

/// A slide record together with its density verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedSlide {
    #[serde(flatten)]
    pub slide: SlideRecord,
    pub density_analysis: DensityAnalysis,
}

/// Presentation-level metadata with placeholders filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationMetadata {
    pub title: String,
    pub author: String,
    pub subject: String,
    pub keywords: String,
    pub total_slides: usize,
    pub created: String,
    pub modified: String,
}

/// Slides extracted from a presentation, before density analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedPresentation {
    pub metadata: PresentationMetadata,
    pub slides: Vec<SlideRecord>,
}

/// Full analysis of a presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentationAnalysis {
    pub metadata: PresentationMetadata,
    pub slides: Vec<AnalyzedSlide>,
}

impl PresentationAnalysis {
    /// Iterate over the slide records without their density verdicts.
    pub fn slide_records(&self) -> impl Iterator<Item = &SlideRecord> {
        self.slides.iter().map(|s| &s.slide)
    }
}
