// file: src/docx/package.rs
// description: in-memory OPC (zip) package holding the parts of a .docx file
// reference: https://docs.rs/zip

use crate::error::{FormatterError, Result};
use quick_xml::Reader;
use quick_xml::events::Event;
use std::io::{Cursor, Read, Write};
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

const PACKAGE_RELS_PART: &str = "_rels/.rels";
const OFFICE_DOCUMENT_REL_SUFFIX: &str = "/officeDocument";
const DEFAULT_MAIN_PART: &str = "word/document.xml";

/// Used by `from_bytes`; callers holding a `Config` pass `processing.max_unpacked_mb`.
pub const DEFAULT_MAX_UNPACKED_BYTES: usize = 100 * 1_048_576;
const PREALLOCATION_CAP: usize = 1_048_576;

#[derive(Debug, Clone)]
struct PackageEntry {
    name: String,
    data: Vec<u8>,
    compression: CompressionMethod,
    is_dir: bool,
}

/// Every archive entry in its original order, plus the name of the main document part.
#[derive(Debug, Clone)]
pub struct DocxPackage {
    entries: Vec<PackageEntry>,
    main_part: String,
}

impl DocxPackage {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes_with_limit(bytes, DEFAULT_MAX_UNPACKED_BYTES)
    }

    /// Loads every entry, failing once the decompressed parts together exceed
    /// `max_unpacked_bytes`. Declared entry sizes are never trusted for allocation.
    pub fn from_bytes_with_limit(bytes: &[u8], max_unpacked_bytes: usize) -> Result<Self> {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(|e| {
            FormatterError::Parse(format!("not a valid document container: {}", e))
        })?;

        let mut remaining = max_unpacked_bytes;
        let mut entries = Vec::with_capacity(archive.len());
        for index in 0..archive.len() {
            let file = archive.by_index(index).map_err(|e| {
                FormatterError::Parse(format!("unreadable archive entry #{}: {}", index, e))
            })?;

            let name = file.name().to_string();
            let compression = file.compression();
            let is_dir = file.is_dir();
            let declared = usize::try_from(file.size()).unwrap_or(usize::MAX);

            let mut data = Vec::with_capacity(declared.min(remaining).min(PREALLOCATION_CAP));
            file.take((remaining as u64).saturating_add(1))
                .read_to_end(&mut data)
                .map_err(|e| FormatterError::Parse(format!("failed to read {}: {}", name, e)))?;

            if data.len() > remaining {
                return Err(FormatterError::Parse(format!(
                    "document parts exceed the unpacked size limit of {} bytes at {}",
                    max_unpacked_bytes, name
                )));
            }
            remaining -= data.len();

            entries.push(PackageEntry {
                name,
                data,
                compression,
                is_dir,
            });
        }

        let main_part = locate_main_part(&entries)?;
        debug!(
            "Loaded package with {} parts, main part {}",
            entries.len(),
            main_part
        );

        Ok(Self { entries, main_part })
    }

    pub fn main_part_name(&self) -> &str {
        &self.main_part
    }

    pub fn part_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    pub fn part(&self, name: &str) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.data.as_slice())
    }

    /// The main document part decoded as UTF-8, without a byte order mark.
    pub fn main_part_xml(&self) -> Result<String> {
        let data = self.part(&self.main_part).ok_or_else(|| {
            FormatterError::Parse(format!("missing main document part {}", self.main_part))
        })?;

        let xml = String::from_utf8(data.to_vec()).map_err(|e| {
            FormatterError::Parse(format!("{} is not valid UTF-8: {}", self.main_part, e))
        })?;

        Ok(match xml.strip_prefix('\u{feff}') {
            Some(stripped) => stripped.to_string(),
            None => xml,
        })
    }

    /// Re-encodes the package, substituting `main_xml` for the main document part.
    pub fn write_with_main_part(&self, main_xml: &str) -> Result<Vec<u8>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

        for entry in &self.entries {
            let method = match entry.compression {
                CompressionMethod::Stored => CompressionMethod::Stored,
                _ => CompressionMethod::Deflated,
            };
            let options = SimpleFileOptions::default().compression_method(method);

            if entry.is_dir {
                writer.add_directory(entry.name.as_str(), options)?;
                continue;
            }

            writer.start_file(entry.name.as_str(), options)?;
            if entry.name == self.main_part {
                writer.write_all(main_xml.as_bytes())?;
            } else {
                writer.write_all(&entry.data)?;
            }
        }

        let cursor = writer.finish()?;
        Ok(cursor.into_inner())
    }
}

fn locate_main_part(entries: &[PackageEntry]) -> Result<String> {
    let has_part = |name: &str| entries.iter().any(|entry| entry.name == name);

    let rels = entries.iter().find(|entry| entry.name == PACKAGE_RELS_PART);
    let target = match rels {
        Some(rels) => office_document_target(&rels.data)?,
        None => None,
    };

    let candidate = target.unwrap_or_else(|| DEFAULT_MAIN_PART.to_string());
    if has_part(&candidate) {
        Ok(candidate)
    } else {
        Err(FormatterError::Parse(format!(
            "missing main document part {}",
            candidate
        )))
    }
}

/// Reads `_rels/.rels` and returns the target of the officeDocument relationship.
fn office_document_target(rels_xml: &[u8]) -> Result<Option<String>> {
    let xml = std::str::from_utf8(rels_xml)
        .map_err(|e| FormatterError::Parse(format!("package relationships: {}", e)))?;
    let mut reader = Reader::from_str(xml);

    loop {
        let event = reader
            .read_event()
            .map_err(|e| FormatterError::Parse(format!("package relationships: {}", e)))?;

        match event {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                let mut rel_type = None;
                let mut target = None;

                for attr in e.attributes() {
                    let attr = attr.map_err(|e| {
                        FormatterError::Parse(format!("package relationships: {}", e))
                    })?;
                    let value = attr
                        .unescape_value()
                        .map_err(|e| {
                            FormatterError::Parse(format!("package relationships: {}", e))
                        })?
                        .into_owned();

                    match attr.key.local_name().as_ref() {
                        b"Type" => rel_type = Some(value),
                        b"Target" => target = Some(value),
                        _ => {}
                    }
                }

                if rel_type.is_some_and(|t| t.ends_with(OFFICE_DOCUMENT_REL_SUFFIX)) {
                    return Ok(target.map(|t| t.trim_start_matches('/').to_string()));
                }
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
    }
}
