//! Page-ordered plain-text extraction for statement PDFs.
//!
//! Every `*.pdf` directly inside the statements folder is read in file-name order,
//! pages in physical order. Each page that yields text contributes `text + "\n"`.
//! A file that cannot be opened or parsed fails the whole extraction.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use lopdf::Document;
use tracing::debug;

use crate::error::{IngestError, Result};

/// List the PDF files directly inside `dir` (non-recursive), sorted by file name.
pub fn list_pdf_files(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let entries = fs::read_dir(dir).map_err(|e| IngestError::io(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| IngestError::io(dir, e))?;
        let path = entry.path();
        if path.is_file() && has_pdf_extension(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Extract the text of one PDF, pages in document order.
pub fn extract_file_text(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();

    // Handle is dropped as soon as the document is loaded.
    let doc = {
        let file = File::open(path).map_err(|e| IngestError::io(path, e))?;
        Document::load_from(BufReader::new(file)).map_err(|e| IngestError::pdf(path, e))?
    };

    let pages = doc.get_pages();
    debug!(file = %path.display(), pages = pages.len(), "loaded statement");

    let mut out = String::new();
    for page_number in pages.keys() {
        let text = doc
            .extract_text(&[*page_number])
            .map_err(|e| IngestError::pdf(path, e))?;
        if text.is_empty() {
            continue;
        }
        out.push_str(&text);
        out.push('\n');
    }
    Ok(out)
}

/// Concatenate the text of every PDF in `dir`.
///
/// Returns an empty string when the folder holds no PDFs or none yield text.
pub fn extract_dir_text(dir: impl AsRef<Path>) -> Result<String> {
    let mut all_text = String::new();
    for file in list_pdf_files(dir)? {
        all_text.push_str(&extract_file_text(&file)?);
    }
    Ok(all_text)
}
