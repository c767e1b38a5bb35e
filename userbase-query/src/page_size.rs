//! Page size resolution.
//!
//! Client hints arrive as raw query-string text. Resolution never fails:
//! unusable input falls back to [`DEFAULT_PAGE_SIZE`] and oversized input
//! is clamped to [`MAX_PAGE_SIZE`]. There is no lower clamp, so zero and
//! negative hints pass through unchanged.

/// Page size used when the client does not ask for one.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Largest page a client can request.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Maps a raw page-size hint to the page size the engine will use.
///
/// The hint is read as a base-10 integer prefix: leading whitespace and a
/// sign are allowed, and parsing stops at the first non-digit (`"25abc"`
/// reads as 25). A hint with no leading digits resolves to the default.
#[must_use]
pub fn resolve(requested: Option<&str>) -> i64 {
    match requested.and_then(parse_leading_int) {
        Some(n) => n.min(MAX_PAGE_SIZE),
        None => DEFAULT_PAGE_SIZE,
    }
}

fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first()? {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };

    let digits = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .map(|b| i64::from(b - b'0'));

    let mut value: i64 = 0;
    let mut seen = false;
    for digit in digits {
        seen = true;
        // Saturate instead of overflowing; the result is clamped anyway.
        value = value.saturating_mul(10).saturating_add(digit);
    }

    if !seen {
        return None;
    }
    Some(if negative { -value } else { value })
}
