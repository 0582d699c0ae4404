//! Split statement text into per-period segments.
//!
//! Expected extracted-text shape (one block per statement period):
//!   January 1, 2024 to January 31, 2024:
//!     Deposits: $1,000.00
//!     ATM and Debit Card Subtractions: -$200.00
//!     Other Subtractions: -$15.00
//!     Ending Balance: $785.00

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::amount::{parse_amount, sum_amounts};

static PERIOD_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?P<period>[A-Za-z]+\s+\d{1,2},\s*\d{4}\s+to\s+",
        r"[A-Za-z]+\s+\d{1,2},\s*\d{4}):"
    ))
    .expect("period header regex")
});

// Where a segment's content stops: the start of the next "<Month> <Day>, <Year> to".
static PERIOD_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z]+\s+\d{1,2},\s*\d{4}\s+to").expect("period boundary regex")
});

pub(crate) static DEPOSITS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Deposits:\s*\$(?P<amt>[\d,]+\.\d{2})").expect("deposits regex")
});

pub(crate) static SUBTRACTIONS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?P<label>ATM and Debit Card Subtractions|Other Subtractions):",
        r"\s*-\$(?P<amt>[\d,]+\.\d{2})"
    ))
    .expect("subtractions regex")
});

static ENDING_BALANCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Ending Balance:\s*\$(?P<amt>[\d,]+\.\d{2})").expect("ending balance regex")
});

/// One statement period and the figures found inside its text span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySegment {
    /// Header label without the trailing colon, e.g. "January 1, 2024 to January 31, 2024".
    pub period: String,
    /// First `Deposits:` amount in the span; 0.0 when missing.
    pub total_deposit: f64,
    /// Sum of every subtraction amount in the span.
    pub total_expense: f64,
    /// First `Ending Balance:` amount; `None` when missing (not zero).
    pub ending_balance: Option<f64>,
    pub raw_content: String,
}

impl MonthlySegment {
    fn from_span(period: &str, content: &str) -> Self {
        let content = content.trim();

        let total_deposit = DEPOSITS
            .captures(content)
            .and_then(|c| parse_amount(&c["amt"]))
            .unwrap_or(0.0);
        let total_expense = sum_amounts(
            SUBTRACTIONS
                .captures_iter(content)
                .filter_map(|c| c.name("amt"))
                .map(|m| m.as_str()),
        );
        let ending_balance = ENDING_BALANCE
            .captures(content)
            .and_then(|c| parse_amount(&c["amt"]));

        Self {
            period: period.trim().trim_end_matches(':').to_string(),
            total_deposit,
            total_expense,
            ending_balance,
            raw_content: content.to_string(),
        }
    }

    /// Start and end dates named in the period label.
    ///
    /// `None` when either bound is not a real calendar date ("February 30, 2024").
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        // Normalize "January 1,2024\nto ..." to single-spaced "January 1, 2024 to ...".
        let normalized = self
            .period
            .replace(',', ", ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        let (start, end) = normalized.split_once(" to ")?;
        Some((parse_long_date(start)?, parse_long_date(end)?))
    }
}

fn parse_long_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%B %d, %Y").ok()
}

/// Find every period header and capture the text up to the next period boundary
/// (or end of input). Segments come back in the order their headers appear.
pub fn extract_monthly_segments(text: &str) -> Vec<MonthlySegment> {
    let mut out = Vec::new();
    let mut pos = 0;

    while pos <= text.len() {
        let Some(caps) = PERIOD_HEADER.captures_at(text, pos) else {
            break;
        };
        let (Some(header), Some(period)) = (caps.get(0), caps.name("period")) else {
            break;
        };

        let content_start = header.end();
        let content_end = PERIOD_BOUNDARY
            .find_at(text, content_start)
            .map_or(text.len(), |m| m.start());

        out.push(MonthlySegment::from_span(
            period.as_str(),
            &text[content_start..content_end],
        ));
        pos = content_end;
    }

    debug!(segments = out.len(), "extracted statement periods");
    out
}
