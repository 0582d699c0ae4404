use anyhow::Result;
use std::io::{self, BufRead, Write};

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// API key from the environment (after `.env` is loaded), else asked for on stdin.
pub fn resolve_api_key() -> Result<String> {
    if let Some(key) = non_blank(std::env::var(API_KEY_ENV).ok()) {
        return Ok(key);
    }
    let stdin = io::stdin();
    prompt_from("Enter your OpenAI API key", &mut stdin.lock(), &mut io::stdout())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn prompt_from(label: &str, input: &mut impl BufRead, out: &mut impl Write) -> Result<String> {
    // Plain prompt; the key is echoed.
    write!(out, "{}: ", label)?;
    out.flush().ok();
    let mut s = String::new();
    input.read_line(&mut s)?;
    Ok(s.trim().to_string())
}
