//! Display helpers for byte counts and long strings.

const UNITS: [&str; 9] = ["Bytes", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

/// Format a byte count into the largest unit where the value lands in
/// `[1, 1024)`, rounded to two decimal places with trailing zeros trimmed.
pub fn format_bytes(bytes: u64) -> String {
    format_bytes_with(bytes, 2)
}

/// Like [`format_bytes`] with an explicit number of decimal places.
pub fn format_bytes_with(bytes: u64, decimals: usize) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let exponent = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exponent as i32);

    let rounded = format!("{value:.decimals$}");
    let trimmed = if rounded.contains('.') {
        rounded.trim_end_matches('0').trim_end_matches('.')
    } else {
        rounded.as_str()
    };

    format!("{} {}", trimmed, UNITS[exponent])
}

/// Clamp a string to `length` characters, appending `...` when truncated.
pub fn truncate(text: &str, length: usize) -> String {
    if text.chars().count() > length {
        let head: String = text.chars().take(length).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}
