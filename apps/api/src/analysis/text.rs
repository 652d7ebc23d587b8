//! Resume text extraction for uploads: PDF, DOCX or plain text.

use std::io::{Cursor, Read};

use anyhow::{anyhow, bail, Context, Result};
use bytes::Bytes;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::Event;
use quick_xml::Reader;

const PDF_MIME: &str = "application/pdf";
const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResumeFormat {
    Pdf,
    Docx,
    PlainText,
}

fn detect_format(filename: &str, content_type: Option<&str>, data: &[u8]) -> Option<ResumeFormat> {
    let name = filename.to_ascii_lowercase();
    let mime = content_type
        .and_then(|c| c.split(';').next())
        .map(|c| c.trim().to_ascii_lowercase())
        .unwrap_or_default();

    if mime == PDF_MIME || name.ends_with(".pdf") || data.starts_with(b"%PDF-") {
        Some(ResumeFormat::Pdf)
    } else if mime == DOCX_MIME || name.ends_with(".docx") {
        Some(ResumeFormat::Docx)
    } else if mime == "text/plain" || name.ends_with(".txt") {
        Some(ResumeFormat::PlainText)
    } else {
        None
    }
}

/// Extracts plain text from an uploaded resume. PDF and DOCX parsing run on a
/// blocking thread; plain text is read as (lossy) UTF-8. Anything else is
/// rejected rather than stored as bytes.
pub async fn extract_resume_text(
    filename: &str,
    content_type: Option<&str>,
    data: Bytes,
) -> Result<String> {
    let text = match detect_format(filename, content_type, &data) {
        Some(ResumeFormat::Pdf) => {
            tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data))
                .await
                .map_err(|e| anyhow!("PDF extraction aborted: {e}"))?
                .map_err(|e| anyhow!("Could not read PDF: {e}"))?
        }
        Some(ResumeFormat::Docx) => tokio::task::spawn_blocking(move || extract_docx_text(&data))
            .await
            .map_err(|e| anyhow!("DOCX extraction aborted: {e}"))??,
        Some(ResumeFormat::PlainText) => String::from_utf8_lossy(&data).into_owned(),
        None => bail!("Unsupported file type: {filename} (expected PDF, DOCX or plain text)"),
    };
    Ok(text.trim().to_string())
}

/// Reads `word/document.xml` and joins the `w:t` runs of each paragraph.
fn extract_docx_text(data: &[u8]) -> Result<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data)).context("Could not read DOCX")?;
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .context("DOCX has no word/document.xml")?
        .read_to_string(&mut xml)?;

    let mut reader = Reader::from_str(&xml);
    let mut buf = Vec::new();
    let mut current = String::new();
    let mut lines = Vec::new();
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:p" => current.clear(),
                b"w:t" => in_text = true,
                _ => {}
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:p" => {
                    if !current.trim().is_empty() {
                        lines.push(current.trim().to_string());
                    }
                    current.clear();
                }
                b"w:t" => in_text = false,
                _ => {}
            },
            Ok(Event::Empty(e)) => {
                if e.name().as_ref() == b"w:tab" {
                    current.push('\t');
                }
            }
            Ok(Event::Text(e)) if in_text => {
                current.push_str(&e.xml_content()?);
            }
            Ok(Event::GeneralRef(e)) if in_text => {
                if let Some(resolved) = resolve_predefined_entity(&String::from_utf8_lossy(&e)) {
                    current.push_str(resolved);
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(err.into()),
            _ => {}
        }
        buf.clear();
    }

    Ok(lines.join("\n"))
}
