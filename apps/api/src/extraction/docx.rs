//! DOCX text extraction: reads `word/document.xml` from the zip container and keeps
//! the contents of `<w:t>` runs, one line per paragraph.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use crate::extraction::ExtractionError;

const DOCUMENT_PART: &str = "word/document.xml";

pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|e| ExtractionError::Docx(e.to_string()))?;
    let mut part = archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| ExtractionError::Docx(format!("{DOCUMENT_PART}: {e}")))?;

    let mut xml = String::new();
    part.read_to_string(&mut xml)
        .map_err(|e| ExtractionError::Docx(e.to_string()))?;

    document_text(&xml)
}

fn document_text(xml: &str) -> Result<String, ExtractionError> {
    let mut reader = Reader::from_str(xml);
    let mut out = String::new();
    let mut in_text_run = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| ExtractionError::Docx(e.to_string()))?;
        match event {
            Event::Start(e) if e.local_name().as_ref() == b"t" => in_text_run = true,
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_text_run = false,
                b"p" => out.push('\n'),
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"tab" => out.push('\t'),
                b"br" | b"cr" => out.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_text_run => {
                let text = t
                    .unescape()
                    .map_err(|e| ExtractionError::Docx(e.to_string()))?;
                out.push_str(&text);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(out.trim().to_string())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    use super::*;

    const BODY: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p>
    <w:p><w:r><w:t xml:space="preserve">Python </w:t></w:r><w:r><w:t>&amp; SQL</w:t></w:r></w:p>
    <w:p><w:r><w:instrText>IGNORED</w:instrText></w:r></w:p>
  </w:body>
</w:document>"#;

    fn docx_bytes(part: &str, xml: &str) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer.start_file(part, SimpleFileOptions::default()).unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_paragraphs_become_lines() {
        let text = extract_text(&docx_bytes(DOCUMENT_PART, BODY)).unwrap();
        assert_eq!(text, "Jane Doe\nPython & SQL");
    }

    #[test]
    fn test_missing_document_part() {
        let err = extract_text(&docx_bytes("word/other.xml", BODY)).unwrap_err();
        assert!(err.to_string().contains(DOCUMENT_PART));
    }
}
