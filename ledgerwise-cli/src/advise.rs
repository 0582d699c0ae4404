//! The default run: statements -> summary + advice -> follow-up questions.

use anyhow::{Context, Result};
use ledgerwise_ingest::{extract_dir_text, list_pdf_files};
use std::io::{BufRead, Write};
use std::path::Path;
use tracing::{info, warn};

use crate::llm::{self, CompletionService};
use crate::session;

/// Extract statement text, or print why there is nothing to work with.
///
/// `None` means the run should stop: the folder is missing or no text came out.
pub fn load_statement_text(dir: &Path, announce: bool, out: &mut impl Write) -> Result<Option<String>> {
    if !dir.exists() {
        writeln!(out, "Folder '{}' not found!", dir.display())?;
        return Ok(None);
    }

    if announce {
        writeln!(out, "Reading PDF bank statements from {}", dir.display())?;
        let files = list_pdf_files(dir).with_context(|| format!("listing {}", dir.display()))?;
        for file in &files {
            if let Some(name) = file.file_name() {
                writeln!(out, "  {}", name.to_string_lossy())?;
            }
        }
    }

    let text = extract_dir_text(dir).with_context(|| format!("extracting {}", dir.display()))?;
    if text.is_empty() {
        writeln!(out, "No text was extracted from the PDFs.")?;
        return Ok(None);
    }
    info!(chars = text.len(), "extracted statement text");
    Ok(Some(text))
}

/// Ask for the one-shot analysis, report it (or its failure), then hand over to the
/// question loop. A failed analysis never stops the session.
pub async fn advise_on_text(
    service: &impl CompletionService,
    pdf_text: &str,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    writeln!(out, "Sending the bank statements to the advisor for analysis...")?;
    match llm::get_summary_and_advice(service, pdf_text).await {
        Ok(advice) => {
            writeln!(out, "\nSummary and Financial Advice:\n")?;
            writeln!(out, "{advice}")?;
        }
        Err(e) => {
            warn!(error = ?e, "statement analysis failed");
            writeln!(out, "{e}")?;
        }
    }

    let asked = session::interactive_session(service, input, out).await?;
    info!(questions = asked, "session ended");
    Ok(())
}

pub async fn run_advice(
    service: &impl CompletionService,
    dir: &Path,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    let Some(pdf_text) = load_statement_text(dir, true, out)? else {
        return Ok(());
    };
    advise_on_text(service, &pdf_text, input, out).await
}
