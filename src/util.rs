// Utility helpers for parsing and basic statistics.
//
// This module centralizes the "dirty" CSV cell handling so the rest of the
// pipeline can assume clean, typed values.
use num_format::{Locale, ToFormattedString};

/// Parse an observation value.
///
/// - Accepts `Option<&str>` so callers can pass through absent cells.
/// - Trims whitespace.
/// - The whole cell must be a number; `N/A`, `NaN` and infinities are
///   rejected so that only finite values reach the pipeline.
pub fn parse_f64_safe(s: Option<&str>) -> Option<f64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Integer coercion for year cells.
///
/// Reads an optional sign followed by the leading run of ASCII digits and
/// ignores whatever follows, so `"2024.5"` gives `2024` and `"2024 (est.)"`
/// gives `2024`. Text without leading digits is rejected.
pub fn parse_leading_i32(s: Option<&str>) -> Option<i32> {
    let s = s?.trim();
    let (sign, digits) = match s.as_bytes().first()? {
        b'-' => (-1, &s[1..]),
        b'+' => (1, &s[1..]),
        _ => (1, s),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    digits[..end].parse::<i32>().ok().map(|v| v * sign)
}

/// Lenient float parse used by the flat minimum-wage file: anything
/// unparseable counts as zero.
pub fn parse_f64_or_zero(s: Option<&str>) -> f64 {
    parse_f64_safe(s).unwrap_or(0.0)
}

pub fn average(v: &[f64]) -> f64 {
    // Standard arithmetic mean; returns 0 for an empty slice to avoid NaNs.
    if v.is_empty() {
        return 0.0;
    }
    let sum: f64 = v.iter().copied().sum();
    sum / v.len() as f64
}

/// Round half away from zero to `decimals` places.
pub fn round_to(n: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (n * factor).round() / factor
}

/// Percent change rendered with an explicit `+` for growth, e.g. `+10.0%`.
pub fn format_signed_percent(change: f64) -> String {
    if change > 0.0 {
        format!("+{:.1}%", change)
    } else {
        format!("{:.1}%", change)
    }
}

pub fn format_number(n: f64, decimals: usize) -> String {
    // Fixed decimals plus locale-aware thousands separators (`1,234.50`).
    let neg = n.is_sign_negative() && n != 0.0;
    let s = format!("{:.*}", decimals, n.abs());
    let mut parts = s.split('.');
    let int_part = parts.next().unwrap_or("0");
    let frac_part = parts.next();
    let int_val: i64 = int_part.parse().unwrap_or(0);
    let mut res = int_val.to_formatted_string(&Locale::en);
    if let Some(frac) = frac_part {
        res.push('.');
        res.push_str(frac);
    }
    if neg {
        format!("-{}", res)
    } else {
        res
    }
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    // Used for counts in console messages (e.g., `9,855 rows loaded`).
    n.to_formatted_string(&Locale::en)
}

/// `tabled` column formatter for floating-point cells.
pub fn display_2dp(v: &f64) -> String {
    format_number(*v, 2)
}
