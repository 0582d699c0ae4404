//! ledgerwise-ingest: turn a directory of PDF bank statements into one flat text blob.

pub mod error;
pub mod pdf_text;

pub use error::{IngestError, Result};
pub use pdf_text::{extract_dir_text, extract_file_text, list_pdf_files};
