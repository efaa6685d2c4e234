//! `m:ss` time formatting for transport labels and transcript timestamps
//!
//! The analysis backend writes transcript timestamps as `m:ss` (minutes
//! unpadded, seconds two-digit). Formatting and parsing here are exact
//! inverses of that shape so a seek position can be matched back to a
//! transcript entry by string equality.

/// Label shown when a time value is unknown or invalid
pub const ZERO_LABEL: &str = "0:00";

/// Format seconds as `m:ss`.
///
/// Fractional seconds are truncated. Negative, NaN and infinite inputs
/// format as `0:00`.
///
/// # Examples
///
/// ```
/// use callqa_common::time_format::format_mmss;
///
/// assert_eq!(format_mmss(125.0), "2:05");
/// assert_eq!(format_mmss(59.9), "0:59");
/// assert_eq!(format_mmss(3600.0), "60:00");
/// assert_eq!(format_mmss(-4.0), "0:00");
/// ```
pub fn format_mmss(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return ZERO_LABEL.to_string();
    }
    let total = seconds.trunc() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Parse an `m:ss` string into whole seconds.
///
/// Only the exact two-part `minutes:seconds` shape is accepted: one or more
/// digits, a colon, then exactly two digits below 60. Anything else parses
/// to `0`.
///
/// # Examples
///
/// ```
/// use callqa_common::time_format::parse_mmss;
///
/// assert_eq!(parse_mmss("2:05"), 125);
/// assert_eq!(parse_mmss("00:07"), 7);
/// assert_eq!(parse_mmss("bad"), 0);
/// assert_eq!(parse_mmss("1:2:3"), 0);
/// ```
pub fn parse_mmss(text: &str) -> u32 {
    try_parse_mmss(text).unwrap_or(0)
}

/// Parse an `m:ss` string, returning `None` for any other shape
pub fn try_parse_mmss(text: &str) -> Option<u32> {
    let mut parts = text.trim().split(':');
    let minutes = parts.next()?;
    let seconds = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(minutes) || seconds.len() != 2 || !all_digits(seconds) {
        return None;
    }
    let minutes: u32 = minutes.parse().ok()?;
    let seconds: u32 = seconds.parse().ok()?;
    if seconds >= 60 {
        return None;
    }
    minutes.checked_mul(60)?.checked_add(seconds)
}

/// Format an elapsed/duration pair as a transport label (`0:12 / 3:40`)
///
/// An unknown duration renders as `0:00`.
pub fn format_progress(elapsed: f64, duration: Option<f64>) -> String {
    let duration = duration.map(format_mmss).unwrap_or_else(|| ZERO_LABEL.to_string());
    format!("{} / {}", format_mmss(elapsed), duration)
}
