//! Line-by-line number summing.
//!
//! Each non-blank line contributes at most one number. Anything that is not a
//! digit, `.` or `-` is stripped first, so `1,200` and ` 300円` both count.

use crate::legacy::coerce::parse_loose_number;

pub const KEY: &str = "mini_tools_total_lines_v1";

/// Numbers found in `text`, one per usable line, in order.
pub fn parse_numbers(text: &str) -> Vec<f64> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(parse_loose_number)
        .collect()
}

pub fn sum(numbers: &[f64]) -> f64 {
    numbers.iter().sum()
}

/// Formats with thousands separators and at most three fraction digits.
pub fn format_grouped(n: f64) -> String {
    if !n.is_finite() {
        return n.to_string();
    }

    let fixed = format!("{:.3}", n.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let negative = n < 0.0 && (int_part != "0" || !frac_part.is_empty());
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}
