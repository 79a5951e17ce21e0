//! Minimal WordprocessingML writer.
//!
//! Emits only the three parts Word needs to open a document: content types,
//! the package relationship, and `word/document.xml`.

use std::io::{Seek, Write};

use quick_xml::escape::escape;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::OutputError;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const DOCUMENT_HEAD: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#;

const DOCUMENT_TAIL: &str = "<w:sectPr/></w:body></w:document>";

const PAGE_BREAK: &str = r#"<w:p><w:r><w:br w:type="page"/></w:r></w:p>"#;

/// One body paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    /// Text; embedded newlines become line breaks inside the paragraph.
    pub text: String,
    pub page_break_after: bool,
}

impl Paragraph {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            page_break_after: false,
        }
    }

    pub fn with_page_break(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            page_break_after: true,
        }
    }
}

/// Characters XML 1.0 cannot carry, even escaped.
fn is_xml_illegal(c: char) -> bool {
    matches!(c, '\u{0}'..='\u{8}' | '\u{B}' | '\u{C}' | '\u{E}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}')
}

fn push_paragraph(xml: &mut String, paragraph: &Paragraph) {
    xml.push_str("<w:p><w:r>");
    for (i, line) in paragraph.text.split('\n').enumerate() {
        if i > 0 {
            xml.push_str("<w:br/>");
        }
        let clean: String = line
            .chars()
            .filter(|c| *c != '\r' && !is_xml_illegal(*c))
            .collect();
        xml.push_str(r#"<w:t xml:space="preserve">"#);
        xml.push_str(&escape(clean.as_str()));
        xml.push_str("</w:t>");
    }
    xml.push_str("</w:r></w:p>");
    if paragraph.page_break_after {
        xml.push_str(PAGE_BREAK);
    }
}

/// Body XML for `word/document.xml`.
pub fn document_xml(paragraphs: &[Paragraph]) -> String {
    let mut xml = String::from(DOCUMENT_HEAD);
    for paragraph in paragraphs {
        push_paragraph(&mut xml, paragraph);
    }
    xml.push_str(DOCUMENT_TAIL);
    xml
}

/// Write a complete DOCX package to `writer`.
pub fn write_docx<W: Write + Seek>(writer: W, paragraphs: &[Paragraph]) -> Result<W, OutputError> {
    let mut zip = ZipWriter::new(writer);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file("[Content_Types].xml", options)?;
    zip.write_all(CONTENT_TYPES.as_bytes())?;

    zip.start_file("_rels/.rels", options)?;
    zip.write_all(PACKAGE_RELS.as_bytes())?;

    zip.start_file("word/document.xml", options)?;
    zip.write_all(document_xml(paragraphs).as_bytes())?;

    Ok(zip.finish()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    fn read_part(bytes: Vec<u8>, name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut part = archive.by_name(name).unwrap();
        let mut out = String::new();
        part.read_to_string(&mut out).unwrap();
        out
    }

    #[test]
    fn test_escapes_and_strips_control_chars() {
        let xml = document_xml(&[Paragraph::new("a < b & \"c\"\u{7}\u{C}")]);
        assert!(xml.contains("a &lt; b &amp; &quot;c&quot;</w:t>"));
        assert!(!xml.contains('\u{7}'));
    }

    #[test]
    fn test_newlines_become_breaks() {
        let xml = document_xml(&[Paragraph::new("line one\r\nline two")]);
        assert!(xml.contains("line one</w:t><w:br/><w:t xml:space=\"preserve\">line two"));
    }

    #[test]
    fn test_package_parts() {
        let paragraphs = vec![
            Paragraph::with_page_break("প্রথম পাতা"),
            Paragraph::with_page_break("second page"),
        ];
        let bytes = write_docx(Cursor::new(Vec::new()), &paragraphs)
            .unwrap()
            .into_inner();

        let document = read_part(bytes.clone(), "word/document.xml");
        assert!(document.contains("প্রথম পাতা"));
        assert_eq!(document.matches(r#"<w:br w:type="page"/>"#).count(), 2);

        let types = read_part(bytes.clone(), "[Content_Types].xml");
        assert!(types.contains("/word/document.xml"));
        let rels = read_part(bytes, "_rels/.rels");
        assert!(rels.contains("Target=\"word/document.xml\""));
    }
}
