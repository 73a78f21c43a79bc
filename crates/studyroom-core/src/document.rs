//! Document loading.
//!
//! The pipeline only ever sees extracted text; this module is the thin
//! collaborator that turns a user-chosen file into that text. Plain `.txt`
//! and `.md` files are read as-is. Word `.docx` files contribute the text of
//! their non-empty body paragraphs, one paragraph per line.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use crate::error::DocumentError;

const SUPPORTED_EXTENSIONS: [&str; 3] = ["txt", "md", "docx"];
const DOCX_BODY: &str = "word/document.xml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedDocument {
    /// File name without its directory.
    pub name: String,
    pub contents: String,
}

/// Read a `.txt`, `.md` or `.docx` file into a [`LoadedDocument`].
pub fn load_document(path: &Path) -> Result<LoadedDocument, DocumentError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(DocumentError::UnsupportedFormat(if extension.is_empty() {
            path.display().to_string()
        } else {
            format!(".{extension}")
        }));
    }

    let read_error = |source| DocumentError::Read {
        path: path.to_path_buf(),
        source,
    };
    let contents = if extension == "docx" {
        let file = File::open(path).map_err(read_error)?;
        docx_text(file).map_err(|message| DocumentError::Malformed {
            path: path.to_path_buf(),
            message,
        })?
    } else {
        std::fs::read_to_string(path).map_err(read_error)?
    };

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(LoadedDocument { name, contents })
}

fn docx_text(file: File) -> Result<String, String> {
    let mut archive = ZipArchive::new(file).map_err(|e| e.to_string())?;
    let mut xml = String::new();
    archive
        .by_name(DOCX_BODY)
        .map_err(|e| format!("{DOCX_BODY}: {e}"))?
        .read_to_string(&mut xml)
        .map_err(|e| format!("{DOCX_BODY}: {e}"))?;
    paragraphs_text(&xml)
}

/// Join the non-empty top-level paragraphs of a WordprocessingML body.
/// Paragraphs nested in tables are not part of the body text.
fn paragraphs_text(xml: &str) -> Result<String, String> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut table_depth = 0usize;
    let mut in_text = false;

    loop {
        match reader.read_event().map_err(|e| e.to_string())? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:tbl" => table_depth += 1,
                b"w:t" => in_text = table_depth == 0,
                _ => {}
            },
            Event::Empty(e) if table_depth == 0 => match e.name().as_ref() {
                b"w:tab" => current.push('\t'),
                b"w:br" | b"w:cr" => current.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_text => {
                current.push_str(&t.unescape().map_err(|e| e.to_string())?);
            }
            Event::End(e) => match e.name().as_ref() {
                b"w:tbl" => table_depth = table_depth.saturating_sub(1),
                b"w:t" => in_text = false,
                b"w:p" if table_depth == 0 => {
                    if !current.is_empty() {
                        paragraphs.push(std::mem::take(&mut current));
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs.join("\n"))
}
