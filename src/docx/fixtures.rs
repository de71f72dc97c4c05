// file: src/docx/fixtures.rs
// description: builds small .docx packages for tests
// reference: https://docs.rs/zip

use quick_xml::escape::escape;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const SECTION_PROPERTIES: &str = r#"<w:sectPr><w:pgSz w:w="12240" w:h="15840"/></w:sectPr>"#;

/// Paragraph markup for `text`; `\n` becomes a `<w:br/>` and an empty string an empty paragraph.
pub fn paragraph_xml(text: &str) -> String {
    if text.is_empty() {
        return r#"<w:p><w:pPr><w:jc w:val="left"/></w:pPr></w:p>"#.to_string();
    }

    let runs = text
        .split('\n')
        .map(|line| format!(r#"<w:t xml:space="preserve">{}</w:t>"#, escape(line)))
        .collect::<Vec<_>>()
        .join("<w:br/>");

    format!("<w:p><w:r><w:rPr><w:b/></w:rPr>{}</w:r></w:p>", runs)
}

pub struct DocxFixture {
    main_part: String,
    body: String,
    raw_main: Option<Vec<u8>>,
    relationships: bool,
    include_main: bool,
    extra_parts: Vec<(String, String)>,
}

impl DocxFixture {
    pub fn new() -> Self {
        Self {
            main_part: "word/document.xml".to_string(),
            body: String::new(),
            raw_main: None,
            relationships: true,
            include_main: true,
            extra_parts: Vec::new(),
        }
    }

    pub fn paragraphs(mut self, texts: &[&str]) -> Self {
        self.body = texts.iter().map(|t| paragraph_xml(t)).collect();
        self
    }

    pub fn body_xml(mut self, body: &str) -> Self {
        self.body = body.to_string();
        self
    }

    pub fn raw_main_part(self, xml: &str) -> Self {
        self.raw_main_part_bytes(xml.as_bytes())
    }

    pub fn raw_main_part_bytes(mut self, data: &[u8]) -> Self {
        self.raw_main = Some(data.to_vec());
        self
    }

    pub fn main_part_name(mut self, name: &str) -> Self {
        self.main_part = name.to_string();
        self
    }

    pub fn without_relationships(mut self) -> Self {
        self.relationships = false;
        self
    }

    pub fn without_main_part(mut self) -> Self {
        self.include_main = false;
        self
    }

    pub fn extra_part(mut self, name: &str, content: &str) -> Self {
        self.extra_parts.push((name.to_string(), content.to_string()));
        self
    }

    pub fn main_part_bytes(&self) -> Vec<u8> {
        match &self.raw_main {
            Some(raw) => raw.clone(),
            None => format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><w:body>{}{}</w:body></w:document>"#,
                self.body, SECTION_PROPERTIES
            )
            .into_bytes(),
        }
    }

    pub fn build(&self) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let deflated = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

        writer.start_file("[Content_Types].xml", deflated).unwrap();
        writer.write_all(CONTENT_TYPES.as_bytes()).unwrap();

        if self.relationships {
            let rels = format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="{}"/></Relationships>"#,
                self.main_part
            );
            writer.start_file("_rels/.rels", stored).unwrap();
            writer.write_all(rels.as_bytes()).unwrap();
        }

        if self.include_main {
            writer.start_file(self.main_part.as_str(), deflated).unwrap();
            writer.write_all(&self.main_part_bytes()).unwrap();
        }

        for (name, content) in &self.extra_parts {
            writer.start_file(name.as_str(), deflated).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }

        writer.finish().unwrap().into_inner()
    }
}
