//! Dollar amounts as printed on statements: `1,234.56`.

/// Parse a statement amount, stripping thousands separators and an optional
/// leading `$`. Returns `None` when the rest is not a number.
pub fn parse_amount(s: &str) -> Option<f64> {
    let s = s.trim();
    let s = s.strip_prefix('$').unwrap_or(s);
    s.replace(',', "").parse().ok()
}

/// Sum every captured amount; unparseable captures count as zero.
///
/// Folds from `0.0`: `Sum for f64` starts at `-0.0`, which prints as `$-0.00`.
pub(crate) fn sum_amounts<'a>(amounts: impl Iterator<Item = &'a str>) -> f64 {
    amounts.fold(0.0, |acc, a| acc + parse_amount(a).unwrap_or(0.0))
}
