use chrono::{DateTime, FixedOffset};

/// Parse a `Date` header value.
///
/// RFC 2822 is the wire format; RFC 3339 shows up in generated mail and is
/// tolerated. `None` when the value fits neither — an unreadable date never
/// fails the whole extraction.
pub fn parse(value: &str) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();
    DateTime::parse_from_rfc2822(value)
        .or_else(|_| DateTime::parse_from_rfc3339(value))
        .ok()
}
