//! ledgerwise-finance: statement-period segmentation, deposit/expense totals, and the
//! structured summary handed to the advisor.

pub mod amount;
pub mod segments;
pub mod summary;

pub use amount::parse_amount;
pub use segments::{MonthlySegment, extract_monthly_segments};
pub use summary::{OverallTotals, StructuredSummary, overall_totals, preprocess_statement_text};
