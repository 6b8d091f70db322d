// src/utils/format.rs
//! Display helpers for hashes, file sizes and dates.

use chrono::{DateTime, Utc};

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Shortens a hash to `head...tail` for display.
///
/// Hashes short enough that shortening would not save anything
/// (`len <= 2 * length + 3`) are returned unchanged.
///
/// # Arguments
/// * `hash` - Hash text (normally 64 hex characters)
/// * `length` - Number of characters kept at each end
pub fn format_hash_for_display(hash: &str, length: usize) -> String {
    let chars: Vec<char> = hash.chars().collect();
    if chars.len() <= length * 2 + 3 {
        return hash.to_string();
    }
    let head: String = chars[..length].iter().collect();
    let tail: String = chars[chars.len() - length..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Renders a byte count with a 1024-based unit, e.g. `1.5 KB`.
///
/// Values keep at most two decimals with trailing zeros dropped. Sizes past
/// the gigabyte range stay in GB.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    let mut value = bytes as f64;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rendered = format!("{:.2}", value);
    let trimmed = rendered.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, SIZE_UNITS[unit])
}

/// Calendar date in `YYYY/MM/DD` form.
pub fn format_date(instant: &DateTime<Utc>) -> String {
    instant.format("%Y/%m/%d").to_string()
}
