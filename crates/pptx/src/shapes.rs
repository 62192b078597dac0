//! Reads the shape tree of a slide part into shape descriptors.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use slidecheck_core::{ShapeDescriptor, ShapeKind, TextFrame, TextParagraph, TextRun};

/// `a:rPr/@sz` is expressed in hundredths of a point.
const SIZE_UNITS_PER_POINT: f64 = 100.0;

/// Shape under construction while its element is open.
#[derive(Debug, Default)]
struct ShapeBuilder {
    shape: ShapeDescriptor,
    frame: Option<TextFrame>,
    paragraph: Option<TextParagraph>,
    run: Option<TextRun>,
    /// The open run is an `a:fld`; its size is not reported.
    run_is_field: bool,
    in_text: bool,
}

impl ShapeBuilder {
    fn new(kind: ShapeKind) -> Self {
        Self {
            shape: ShapeDescriptor::new(kind),
            ..Default::default()
        }
    }

    fn can_hold_text(&self) -> bool {
        matches!(self.shape.kind, ShapeKind::AutoShape | ShapeKind::Placeholder)
    }

    fn finish(mut self) -> ShapeDescriptor {
        self.shape.text_frame = self.frame;
        self.shape
    }

    /// Handle an element opening inside this shape. `depth` is the number
    /// of shape elements currently open, 1 for this shape's own children.
    fn open(&mut self, local: &[u8], e: &BytesStart, depth: usize) {
        if depth != 1 {
            return;
        }

        match local {
            b"cNvPr" if self.shape.name.is_none() => {
                self.shape.name = attr_value(e, b"name");
            }
            b"ph" if self.shape.kind == ShapeKind::AutoShape => {
                self.shape.kind = ShapeKind::Placeholder;
            }
            b"txBody" if self.can_hold_text() => {
                self.frame = Some(TextFrame::default());
            }
            b"p" if self.frame.is_some() => {
                self.paragraph = Some(TextParagraph::default());
            }
            b"pPr" => {
                if let Some(paragraph) = self.paragraph.as_mut() {
                    paragraph.level = attr_value(e, b"lvl")
                        .and_then(|v| v.parse().ok())
                        .unwrap_or(0);
                }
            }
            b"r" | b"fld" if self.paragraph.is_some() => {
                self.run = Some(TextRun::default());
                self.run_is_field = local == b"fld";
            }
            b"rPr" if !self.run_is_field => {
                if let Some(run) = self.run.as_mut() {
                    run.font_size = attr_value(e, b"sz")
                        .and_then(|v| v.parse::<f64>().ok())
                        .map(|sz| sz / SIZE_UNITS_PER_POINT);
                }
            }
            b"t" if self.run.is_some() => {
                self.in_text = true;
            }
            b"br" => {
                if let Some(paragraph) = self.paragraph.as_mut() {
                    paragraph.runs.push(TextRun::new("\n"));
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if self.in_text {
            if let Some(run) = self.run.as_mut() {
                run.text.push_str(text);
            }
        }
    }

    fn close(&mut self, local: &[u8], depth: usize) {
        if depth != 1 {
            return;
        }

        match local {
            b"t" => self.in_text = false,
            b"r" | b"fld" => {
                if let (Some(run), Some(paragraph)) = (self.run.take(), self.paragraph.as_mut()) {
                    paragraph.runs.push(run);
                }
                self.run_is_field = false;
            }
            b"p" => {
                if let (Some(paragraph), Some(frame)) = (self.paragraph.take(), self.frame.as_mut()) {
                    frame.paragraphs.push(paragraph);
                }
            }
            _ => {}
        }
    }
}

/// Map a shape-tree element to the kind of shape it starts.
fn shape_kind(local: &[u8]) -> Option<ShapeKind> {
    match local {
        b"sp" => Some(ShapeKind::AutoShape),
        b"pic" => Some(ShapeKind::Picture),
        b"grpSp" => Some(ShapeKind::Group),
        b"graphicFrame" => Some(ShapeKind::GraphicFrame),
        b"cxnSp" => Some(ShapeKind::Connector),
        b"contentPart" => Some(ShapeKind::Other),
        _ => None,
    }
}

/// Extract the top-level shapes of a slide's `p:spTree`, in z-order.
///
/// Shapes nested in a group are part of the group and are not listed on
/// their own. Shapes wrapped in `mc:AlternateContent` are not direct
/// children of the tree and are skipped. Malformed XML stops reading;
/// shapes completed before the error are kept.
pub fn extract_shapes(xml_content: &str) -> Vec<ShapeDescriptor> {
    let mut shapes = Vec::new();
    let mut reader = Reader::from_str(xml_content);
    reader.trim_text(false);

    let mut in_tree = false;
    let mut skip_depth = 0usize;
    let mut shape_depth = 0usize;
    let mut current: Option<ShapeBuilder> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let name = e.name();
                let local = local_name(name.as_ref());

                if local == b"AlternateContent" || skip_depth > 0 {
                    skip_depth += 1;
                    continue;
                }

                if local == b"spTree" {
                    in_tree = true;
                } else if let Some(kind) = shape_kind(local).filter(|_| in_tree) {
                    if shape_depth == 0 {
                        current = Some(ShapeBuilder::new(kind));
                    }
                    shape_depth += 1;
                } else if let Some(builder) = current.as_mut() {
                    builder.open(local, e, shape_depth);
                }
            }
            Ok(Event::Empty(ref e)) => {
                let name = e.name();
                let local = local_name(name.as_ref());

                if skip_depth > 0 {
                    continue;
                }

                if let Some(kind) = shape_kind(local).filter(|_| in_tree) {
                    if shape_depth == 0 {
                        let mut builder = ShapeBuilder::new(kind);
                        builder.shape.name = attr_value(e, b"name");
                        shapes.push(builder.finish());
                    }
                } else if let Some(builder) = current.as_mut() {
                    builder.open(local, e, shape_depth);
                    builder.close(local, shape_depth);
                }
            }
            Ok(Event::Text(ref e)) => {
                if skip_depth > 0 {
                    continue;
                }
                if let Some(builder) = current.as_mut() {
                    let text = e.unescape().unwrap_or_default();
                    builder.text(&text);
                }
            }
            Ok(Event::End(ref e)) => {
                let name = e.name();
                let local = local_name(name.as_ref());

                if skip_depth > 0 {
                    skip_depth -= 1;
                    continue;
                }

                if local == b"spTree" {
                    in_tree = false;
                } else if shape_kind(local).is_some() && in_tree && shape_depth > 0 {
                    shape_depth -= 1;
                    if shape_depth == 0 {
                        if let Some(builder) = current.take() {
                            shapes.push(builder.finish());
                        }
                    }
                } else if let Some(builder) = current.as_mut() {
                    builder.close(local, shape_depth);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                log::warn!(
                    "XML parsing error at position {} (keeping {} shapes): {}",
                    reader.buffer_position(),
                    shapes.len(),
                    e
                );
                break;
            }
            _ => {}
        }
    }

    shapes
}

/// Extract the local name from a potentially namespaced XML element name.
pub(crate) fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}

/// Value of the attribute whose local name is `key`.
pub(crate) fn attr_value(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| local_name(attr.key.as_ref()) == key)
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
}
