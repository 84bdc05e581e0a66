//! Shared rounding and parsing rules used by every calculation.
//!
//! Every derived monetary value goes through [`round3`]; every percentage
//! metric through [`round2`]. Rounding happens at each derivation step, not
//! only at display time, so chained computations stay reproducible.

/// Parse a decimal string, returning `0.0` on failure.
///
/// Invalid numeric input silently becomes zero — a deliberate permissiveness
/// policy for inline editing, where a half-typed value must never raise.
pub fn parse_number(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(0.0)
}

/// Round to 3 decimal places. Used for all currency-like values.
pub fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

/// Round to 2 decimal places. Used for percentage metrics.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
