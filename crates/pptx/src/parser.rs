//! PPTX package reader.

use crate::shapes::{attr_value, extract_shapes, local_name};
use quick_xml::events::Event;
use quick_xml::Reader;
use slidecheck_core::{CoreProperties, Error, PresentationSource, Result, SlideContent};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use zip::result::ZipError;
use zip::ZipArchive;

const PRESENTATION_PATH: &str = "ppt/presentation.xml";
const PRESENTATION_RELS_PATH: &str = "ppt/_rels/presentation.xml.rels";
const CORE_PROPERTIES_PATH: &str = "docProps/core.xml";

/// A loaded PPTX presentation.
#[derive(Debug, Clone)]
pub struct PptxPresentation {
    /// Original filename (without path).
    pub filename: String,
    slides: Vec<SlideContent>,
    core_properties: CoreProperties,
}

impl PresentationSource for PptxPresentation {
    fn slides(&self) -> &[SlideContent] {
        &self.slides
    }

    fn core_properties(&self) -> &CoreProperties {
        &self.core_properties
    }
}

/// Parser for PPTX (Office Open XML) files.
pub struct PptxParser;

impl PptxParser {
    /// Create a new PPTX parser.
    pub fn new() -> Self {
        Self
    }

    /// Open and parse a PPTX file from disk.
    ///
    /// Every failure is reported as [`Error::Load`] for `path`.
    pub fn open(&self, path: impl AsRef<Path>) -> Result<PptxPresentation> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::load(path, e))?;

        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown");

        let presentation = self
            .parse(BufReader::new(file), filename)
            .map_err(|e| Error::load(path, e))?;

        log::info!(
            "Loaded presentation {} ({} slides)",
            path.display(),
            presentation.slide_count()
        );

        Ok(presentation)
    }

    /// Parse a PPTX package from a reader.
    pub fn parse<R: Read + Seek>(&self, reader: R, filename: &str) -> Result<PptxPresentation> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::Zip(format!("Failed to open ZIP: {}", e)))?;

        let slide_order = self.get_slide_order(&mut archive)?;
        log::debug!("{}: {} slides listed", filename, slide_order.len());

        let mut layouts: HashMap<String, String> = HashMap::new();
        let mut slides = Vec::with_capacity(slide_order.len());

        for slide_path in &slide_order {
            slides.push(self.parse_slide(&mut archive, slide_path, &mut layouts)?);
        }

        let core_properties = match read_optional(&mut archive, CORE_PROPERTIES_PATH)? {
            Some(xml) => parse_core_properties(&xml),
            None => {
                log::debug!("{}: no {}", filename, CORE_PROPERTIES_PATH);
                CoreProperties::default()
            }
        };

        Ok(PptxPresentation {
            filename: filename.to_string(),
            slides,
            core_properties,
        })
    }

    /// Get the ordered list of slide part paths.
    ///
    /// Order comes from `p:sldIdLst` in presentation.xml. If that list is
    /// empty the slide relationships are sorted by their target number.
    fn get_slide_order<R: Read + Seek>(&self, archive: &mut ZipArchive<R>) -> Result<Vec<String>> {
        let presentation = read_optional(archive, PRESENTATION_PATH)?.ok_or_else(|| {
            Error::PptxParse(format!("Not a presentation: missing {}", PRESENTATION_PATH))
        })?;

        let rels = match read_optional(archive, PRESENTATION_RELS_PATH)? {
            Some(xml) => parse_relationships(&xml)?,
            None => Vec::new(),
        };

        let by_id: HashMap<&str, &Relationship> =
            rels.iter().map(|rel| (rel.id.as_str(), rel)).collect();

        let mut order = Vec::new();
        for rel_id in slide_ids(&presentation)? {
            match by_id.get(rel_id.as_str()) {
                Some(rel) => order.push(resolve_target("ppt", &rel.target)),
                None => log::warn!("Slide relationship {} not found, skipping", rel_id),
            }
        }

        if order.is_empty() {
            let mut slides: Vec<(String, Option<usize>)> = rels
                .iter()
                .filter(|rel| rel.is_slide())
                .map(|rel| (resolve_target("ppt", &rel.target), extract_slide_number(&rel.target)))
                .collect();

            slides.sort_by(|a, b| match (a.1, b.1) {
                (Some(na), Some(nb)) => na.cmp(&nb),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => a.0.cmp(&b.0),
            });

            order = slides.into_iter().map(|(path, _)| path).collect();
        }

        Ok(order)
    }

    /// Parse a single slide part and resolve its layout name.
    fn parse_slide<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        slide_path: &str,
        layouts: &mut HashMap<String, String>,
    ) -> Result<SlideContent> {
        let content = read_file_from_archive(archive, slide_path)?;
        let layout_name = self.layout_name(archive, slide_path, layouts);

        Ok(SlideContent {
            layout_name,
            shapes: extract_shapes(&content),
        })
    }

    /// Name of the layout a slide uses, or an empty string.
    fn layout_name<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        slide_path: &str,
        layouts: &mut HashMap<String, String>,
    ) -> String {
        let (dir, file) = split_path(slide_path);
        let rels_path = format!("{}/_rels/{}.rels", dir, file);

        let rels = match read_optional(archive, &rels_path) {
            Ok(Some(xml)) => parse_relationships(&xml).unwrap_or_else(|e| {
                log::warn!("{}: {}", rels_path, e);
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!("{}: {}", rels_path, e);
                Vec::new()
            }
        };

        let Some(layout) = rels.iter().find(|rel| rel.is_slide_layout()) else {
            return String::new();
        };
        let layout_path = resolve_target(dir, &layout.target);

        if let Some(name) = layouts.get(&layout_path) {
            return name.clone();
        }

        let name = match read_optional(archive, &layout_path) {
            Ok(Some(xml)) => layout_display_name(&xml),
            _ => String::new(),
        };
        layouts.insert(layout_path, name.clone());
        name
    }
}

impl Default for PptxParser {
    fn default() -> Self {
        Self::new()
    }
}

/// One entry of a `.rels` part.
#[derive(Debug, Clone)]
struct Relationship {
    id: String,
    rel_type: String,
    target: String,
}

impl Relationship {
    fn is_slide(&self) -> bool {
        self.rel_type.ends_with("/slide")
    }

    fn is_slide_layout(&self) -> bool {
        self.rel_type.ends_with("/slideLayout")
    }
}

fn parse_relationships(xml: &str) -> Result<Vec<Relationship>> {
    let mut rels = Vec::new();
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if local_name(e.name().as_ref()) == b"Relationship" =>
            {
                let mut rel = Relationship {
                    id: String::new(),
                    rel_type: String::new(),
                    target: String::new(),
                };

                for attr in e.attributes().flatten() {
                    match attr.key.as_ref() {
                        b"Id" => rel.id = String::from_utf8_lossy(&attr.value).to_string(),
                        b"Type" => rel.rel_type = String::from_utf8_lossy(&attr.value).to_string(),
                        b"Target" => rel.target = String::from_utf8_lossy(&attr.value).to_string(),
                        _ => {}
                    }
                }

                if !rel.id.is_empty() && !rel.target.is_empty() {
                    rels.push(rel);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::Xml(format!("Error parsing relationships: {}", e)));
            }
            _ => {}
        }
    }

    Ok(rels)
}

/// Relationship ids of `p:sldId` entries, in presentation order.
fn slide_ids(xml: &str) -> Result<Vec<String>> {
    let mut ids = Vec::new();
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if local_name(e.name().as_ref()) == b"sldId" =>
            {
                // r:id, not the bare numeric id
                let rel_id = e
                    .attributes()
                    .flatten()
                    .find(|attr| attr.key.as_ref() != b"id" && local_name(attr.key.as_ref()) == b"id")
                    .map(|attr| String::from_utf8_lossy(&attr.value).to_string());

                if let Some(rel_id) = rel_id {
                    ids.push(rel_id);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::Xml(format!("Error parsing presentation.xml: {}", e)));
            }
            _ => {}
        }
    }

    Ok(ids)
}

/// `p:cSld/@name` of a slide layout part.
fn layout_display_name(xml: &str) -> String {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e))
                if local_name(e.name().as_ref()) == b"cSld" =>
            {
                return attr_value(e, b"name").unwrap_or_default();
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                log::warn!("Error parsing slide layout: {}", e);
                break;
            }
            _ => {}
        }
    }

    String::new()
}

/// Read docProps/core.xml. Unknown or malformed content leaves fields unset.
fn parse_core_properties(xml: &str) -> CoreProperties {
    let mut props = CoreProperties::default();
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut current: Option<Vec<u8>> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                current = Some(local_name(e.name().as_ref()).to_vec());
            }
            Ok(Event::Text(ref e)) => {
                let Some(element) = current.as_deref() else {
                    continue;
                };
                let text = e.unescape().unwrap_or_default().to_string();
                let field = match element {
                    b"title" => &mut props.title,
                    b"creator" => &mut props.author,
                    b"subject" => &mut props.subject,
                    b"keywords" => &mut props.keywords,
                    b"created" => &mut props.created,
                    b"modified" => &mut props.modified,
                    _ => continue,
                };
                *field = Some(text);
            }
            Ok(Event::End(_)) => {
                current = None;
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                log::warn!("Error parsing core properties: {}", e);
                break;
            }
            _ => {}
        }
    }

    props
}

/// Read a file from the ZIP archive.
fn read_file_from_archive<R: Read + Seek>(archive: &mut ZipArchive<R>, path: &str) -> Result<String> {
    read_optional(archive, path)?
        .ok_or_else(|| Error::Zip(format!("File not found in archive '{}'", path)))
}

/// Read a file from the ZIP archive, `None` if it is absent.
fn read_optional<R: Read + Seek>(archive: &mut ZipArchive<R>, path: &str) -> Result<Option<String>> {
    let mut file = match archive.by_name(path) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(Error::Zip(format!("Failed to open '{}': {}", path, e))),
    };

    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|e| Error::Zip(format!("Failed to read '{}': {}", path, e)))?;

    Ok(Some(content))
}

/// Split a part path into its directory and file name.
fn split_path(path: &str) -> (&str, &str) {
    path.rsplit_once('/').unwrap_or(("", path))
}

/// Resolve a relationship target against the directory of its source part.
fn resolve_target(base_dir: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }

    let mut parts: Vec<&str> = base_dir.split('/').filter(|p| !p.is_empty()).collect();
    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            other => parts.push(other),
        }
    }

    parts.join("/")
}

/// Extract a slide number from a string like "rId2" or "slide3.xml".
fn extract_slide_number(s: &str) -> Option<usize> {
    let s = s.trim_end_matches(".xml").trim_end_matches(".rels");

    let digits: String = s.chars().rev().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let digits: String = digits.chars().rev().collect();
    digits.parse().ok()
}
