// private sub-module defined in other files
mod byte_cursor;

// exports identifiers from private sub-modules in the current module namespace
pub use self::byte_cursor::ByteCursor;
pub use self::byte_cursor::Endianness;

use std::time::Instant;

/// Returns a formatted string of elapsed time, e.g.
/// `1min 34s 852ms`
pub fn get_formatted_elapsed_time(instant: Instant) -> String {
    let dur = instant.elapsed();
    let minutes = dur.as_secs() / 60;
    let sub_sec = dur.as_secs() % 60;
    let sub_milli = dur.subsec_millis();
    if minutes > 0 {
        return format!("{}min {}.{}s", minutes, sub_sec, sub_milli);
    }
    format!("{}.{}s", sub_sec, sub_milli)
}

/// Parses the leading, optionally signed, run of ASCII digits in `text`
/// after trimming surrounding whitespace. Trailing characters are ignored,
/// so "12.75" yields 12. Returns `None` when no digit leads the text or the
/// value overflows.
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let s = text.trim();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude = digits[..end].parse::<i64>().ok()?;
    if negative {
        return Some(-magnitude);
    }
    Some(magnitude)
}
