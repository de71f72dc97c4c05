// file: src/docx/document.rs
// description: body paragraph scanning and removal on the main document part
// reference: https://docs.rs/quick-xml

use crate::docx::handle::{DocumentHandle, ParagraphHandle};
use crate::docx::package::{DEFAULT_MAX_UNPACKED_BYTES, DocxPackage};
use crate::error::{FormatterError, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::ops::Range;
use tracing::debug;

#[derive(Debug, Clone)]
struct BodyParagraph {
    id: usize,
    span: Range<usize>,
    text: String,
}

/// A loaded `.docx` whose body paragraphs can be listed and detached.
///
/// Paragraphs are tracked as byte spans of the main part XML. Removing one
/// splices its element out of the markup, so everything else in the package
/// is written back exactly as it was read.
#[derive(Debug, Clone)]
pub struct DocxDocument {
    package: DocxPackage,
    xml: String,
    paragraphs: Vec<BodyParagraph>,
}

impl DocxDocument {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes_with_limit(bytes, DEFAULT_MAX_UNPACKED_BYTES)
    }

    pub fn from_bytes_with_limit(bytes: &[u8], max_unpacked_bytes: usize) -> Result<Self> {
        let package = DocxPackage::from_bytes_with_limit(bytes, max_unpacked_bytes)?;
        let xml = package.main_part_xml()?;
        let paragraphs = scan_body_paragraphs(&xml)?;

        debug!("Parsed document with {} body paragraphs", paragraphs.len());

        Ok(Self {
            package,
            xml,
            paragraphs,
        })
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.package.write_with_main_part(&self.xml)
    }

    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    pub fn paragraph_texts(&self) -> Vec<String> {
        self.paragraphs.iter().map(|p| p.text.clone()).collect()
    }

    pub fn package(&self) -> &DocxPackage {
        &self.package
    }
}

impl DocumentHandle for DocxDocument {
    fn list_paragraphs(&self) -> Vec<ParagraphHandle> {
        self.paragraphs
            .iter()
            .map(|p| ParagraphHandle {
                id: p.id,
                text: p.text.clone(),
            })
            .collect()
    }

    fn remove_paragraph(&mut self, paragraph: &ParagraphHandle) -> Result<()> {
        let position = self
            .paragraphs
            .iter()
            .position(|p| p.id == paragraph.id)
            .ok_or_else(|| {
                FormatterError::Processing(format!(
                    "paragraph {} is not part of this document",
                    paragraph.id
                ))
            })?;

        let removed = self.paragraphs.remove(position);
        let width = removed.span.len();
        self.xml.replace_range(removed.span.clone(), "");

        for later in &mut self.paragraphs[position..] {
            later.span = (later.span.start - width)..(later.span.end - width);
        }

        Ok(())
    }
}

struct ParagraphScan {
    start: usize,
    depth: usize,
    text: String,
}

/// Finds every `w:p` that is a direct child of `w:body`, with its span and text.
fn scan_body_paragraphs(xml: &str) -> Result<Vec<BodyParagraph>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut path: Vec<Vec<u8>> = Vec::new();
    let mut paragraphs = Vec::new();
    let mut current: Option<ParagraphScan> = None;

    loop {
        let before = reader.buffer_position() as usize;
        let event = reader.read_event().map_err(|e| {
            FormatterError::Parse(format!(
                "malformed document body near byte {}: {}",
                reader.buffer_position(),
                e
            ))
        })?;

        match event {
            Event::Start(e) => {
                let name = e.local_name().as_ref().to_vec();
                match current.as_mut() {
                    None if name == b"p" && parent_is_body(&path) => {
                        current = Some(ParagraphScan {
                            start: tag_start(xml, before),
                            depth: path.len(),
                            text: String::new(),
                        });
                    }
                    Some(scan) if collects_run_content(&path, scan.depth) => {
                        push_run_marker(&mut scan.text, &e);
                    }
                    _ => {}
                }
                path.push(name);
            }
            Event::Empty(e) => match current.as_mut() {
                None if e.local_name().as_ref() == b"p" && parent_is_body(&path) => {
                    paragraphs.push(BodyParagraph {
                        id: paragraphs.len(),
                        span: tag_start(xml, before)..reader.buffer_position() as usize,
                        text: String::new(),
                    });
                }
                Some(scan) if collects_run_content(&path, scan.depth) => {
                    push_run_marker(&mut scan.text, &e);
                }
                _ => {}
            },
            Event::End(_) => {
                path.pop();
                if current.as_ref().is_some_and(|scan| scan.depth == path.len()) {
                    if let Some(scan) = current.take() {
                        paragraphs.push(BodyParagraph {
                            id: paragraphs.len(),
                            span: scan.start..reader.buffer_position() as usize,
                            text: scan.text,
                        });
                    }
                }
            }
            Event::Text(e) => {
                if let Some(scan) = current.as_mut() {
                    if in_run_text(&path, scan.depth) {
                        let text = e.unescape().map_err(|e| {
                            FormatterError::Parse(format!("invalid text content: {}", e))
                        })?;
                        scan.text.push_str(&text);
                    }
                }
            }
            Event::CData(e) => {
                if let Some(scan) = current.as_mut() {
                    if in_run_text(&path, scan.depth) {
                        scan.text.push_str(&String::from_utf8_lossy(&e));
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

fn parent_is_body(path: &[Vec<u8>]) -> bool {
    path.last().is_some_and(|name| name == b"body")
}

/// Elements below the paragraph root, excluding the root itself.
fn inner_path(path: &[Vec<u8>], depth: usize) -> &[Vec<u8>] {
    path.get(depth + 1..).unwrap_or_default()
}

/// Paragraph text comes from runs that are direct children of the paragraph or
/// of one of its hyperlinks. Runs wrapped in revision marks, content controls
/// or nested text-box paragraphs do not contribute.
fn collects_run_content(path: &[Vec<u8>], depth: usize) -> bool {
    match inner_path(path, depth) {
        [run] => run == b"r",
        [link, run] => link == b"hyperlink" && run == b"r",
        _ => false,
    }
}

fn in_run_text(path: &[Vec<u8>], depth: usize) -> bool {
    match path.split_last() {
        Some((leaf, rest)) => leaf == b"t" && collects_run_content(rest, depth),
        None => false,
    }
}

fn push_run_marker(text: &mut String, element: &BytesStart<'_>) {
    match element.local_name().as_ref() {
        b"tab" | b"ptab" => text.push('\t'),
        b"cr" => text.push('\n'),
        b"br" if is_text_wrapping_break(element) => text.push('\n'),
        b"noBreakHyphen" => text.push('-'),
        _ => {}
    }
}

/// Page and column breaks do not produce a line break in the paragraph text.
fn is_text_wrapping_break(element: &BytesStart<'_>) -> bool {
    !element.attributes().flatten().any(|attr| {
        attr.key.local_name().as_ref() == b"type"
            && matches!(attr.value.as_ref(), b"page" | b"column")
    })
}

/// Byte offset of the `<` that opens the tag read from `position`.
fn tag_start(xml: &str, position: usize) -> usize {
    let limit = (position + 1).min(xml.len());
    xml.as_bytes()[..limit]
        .iter()
        .rposition(|&b| b == b'<')
        .unwrap_or(position)
}
