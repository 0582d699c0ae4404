//! Whole-text totals and the report rendered for the advisor.

use std::fmt::Write as _;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::amount::sum_amounts;
use crate::segments::{DEPOSITS, MonthlySegment, SUBTRACTIONS, extract_monthly_segments};

/// Deposits and expenses summed over the entire text.
///
/// Computed independently of segmentation: a figure outside every period span still
/// counts here, so these need not match the sum of the per-segment figures.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OverallTotals {
    pub total_deposits: f64,
    pub total_expenses: f64,
}

pub fn overall_totals(text: &str) -> OverallTotals {
    OverallTotals {
        total_deposits: sum_amounts(
            DEPOSITS
                .captures_iter(text)
                .filter_map(|c| c.name("amt"))
                .map(|m| m.as_str()),
        ),
        total_expenses: sum_amounts(
            SUBTRACTIONS
                .captures_iter(text)
                .filter_map(|c| c.name("amt"))
                .map(|m| m.as_str()),
        ),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredSummary {
    pub totals: OverallTotals,
    pub segments: Vec<MonthlySegment>,
}

impl StructuredSummary {
    /// Earliest start and latest end date across all readable period labels.
    pub fn coverage(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.segments
            .iter()
            .filter_map(MonthlySegment::date_range)
            .reduce(|(lo, hi), (start, end)| (lo.min(start), hi.max(end)))
    }

    /// Markdown-ish report: overall block, then one entry per period.
    pub fn render(&self) -> String {
        let mut monthly = String::from("### Monthly Trends:\n\n");
        for seg in &self.segments {
            let _ = writeln!(monthly, "- **{}**:", seg.period);
            let _ = writeln!(monthly, "  - Total Deposits: ${:.2}", seg.total_deposit);
            let _ = writeln!(monthly, "  - Total Expenses: ${:.2}", seg.total_expense);
            if let Some(balance) = seg.ending_balance {
                let _ = writeln!(monthly, "  - Ending Balance: ${:.2}", balance);
            }
            monthly.push('\n');
        }

        format!(
            "### Overall Summary:\n- Total Deposits: ${:.2}\n- Total Expenses: ${:.2}\n\n{}",
            self.totals.total_deposits, self.totals.total_expenses, monthly
        )
    }
}

/// Segment the text, compute whole-text totals, and bundle both.
pub fn preprocess_statement_text(text: &str) -> StructuredSummary {
    StructuredSummary {
        totals: overall_totals(text),
        segments: extract_monthly_segments(text),
    }
}
