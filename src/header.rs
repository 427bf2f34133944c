use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::error::EmlError;
use crate::mime::parameter;
use crate::text::encoded_word::decode_words;

/// Canonicalized header name to decoded value. Repeated names merge as
/// `"v1, v2"` in first-seen order.
pub type Headers = BTreeMap<String, String>;

/// Result of scanning one header block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderBlock {
    pub headers: Headers,
    /// Index into the line array of the first body line.
    pub body_start: usize,
}

/// Canonicalize a header name: `content-type` → `Content-Type`.
pub fn canonicalize(name: &str) -> String {
    name.split('-')
        .map(|segment| match segment.chars().next() {
            Some(first) => format!(
                "{}{}",
                first.to_ascii_uppercase(),
                segment[first.len_utf8()..].to_ascii_lowercase(),
            ),
            None => String::new(),
        })
        .collect::<Vec<_>>()
        .join("-")
}

/// Scan the header block of `lines[start..end]`.
///
/// A line starting with space or tab continues the open header, joined by a
/// newline; anything else closes it out (MIME-word-decoding the accumulated
/// value). An empty line ends the block. So does a line starting with the
/// `--boundary` delimiter of a multipart Content-Type already seen in this
/// block — some senders omit the blank line before the first boundary, and
/// in that case `body_start` points at the boundary line itself.
pub fn parse_block(lines: &[&str], start: usize, end: usize) -> Result<HeaderBlock, EmlError> {
    let mut headers = Headers::new();
    let mut open: Option<(String, String)> = None;
    let mut boundary: Option<String> = None;
    let mut body_start = end;

    let mut idx = start;
    while idx < end {
        let line = lines[idx];
        if line.starts_with(' ') || line.starts_with('\t') {
            match open.as_mut() {
                Some((_, value)) => {
                    value.push('\n');
                    value.push_str(line.trim());
                }
                None => return Err(EmlError::InvalidHeader { line: idx + 1 }),
            }
        } else {
            if let Some((name, value)) = open.take() {
                close_header(&mut headers, &mut boundary, name, value);
            }
            if line.is_empty() {
                body_start = idx + 1;
                break;
            }
            if let Some(delimiter) = boundary.as_deref() {
                if line.starts_with(delimiter) {
                    body_start = idx;
                    break;
                }
            }
            open = Some(match line.split_once(':') {
                Some((name, value)) => (canonicalize(name), value.trim().to_string()),
                // No colon: nothing to name this by, dropped at close time.
                None => (String::new(), line.trim().to_string()),
            });
        }
        idx += 1;
    }

    if idx >= end {
        // Ran out of lines without a separator; the last header still counts.
        if let Some((name, value)) = open.take() {
            close_header(&mut headers, &mut boundary, name, value);
        }
        body_start = end;
    }

    Ok(HeaderBlock {
        headers,
        body_start,
    })
}

fn close_header(headers: &mut Headers, boundary: &mut Option<String>, name: String, value: String) {
    if name.is_empty() || value.is_empty() {
        return;
    }
    let value = decode_words(&value);

    if boundary.is_none() && name == "Content-Type" {
        if let Some(parsed) = parameter::parse(&value) {
            if parsed.primary.starts_with("multipart/") {
                if let Some(b) = parsed.parameters.get("boundary") {
                    *boundary = Some(format!("--{b}"));
                }
            }
        }
    }

    match headers.entry(name) {
        Entry::Occupied(mut entry) => {
            let existing = entry.get_mut();
            existing.push_str(", ");
            existing.push_str(&value);
        }
        Entry::Vacant(entry) => {
            entry.insert(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(lines: &[&str]) -> HeaderBlock {
        parse_block(lines, 0, lines.len()).unwrap()
    }

    #[test]
    fn test_canonicalize() {
        assert_eq!(canonicalize("content-type"), "Content-Type");
        assert_eq!(canonicalize("MIME-VERSION"), "Mime-Version");
        assert_eq!(canonicalize("x-test-header"), "X-Test-Header");
    }

    #[test]
    fn test_simple_block() {
        let parsed = block(&["To: a@example.com", "Subject: Hi", "", "body"]);
        assert_eq!(parsed.headers.get("To").map(String::as_str), Some("a@example.com"));
        assert_eq!(parsed.headers.get("Subject").map(String::as_str), Some("Hi"));
        assert_eq!(parsed.body_start, 3);
    }

    #[test]
    fn test_folded_header() {
        let parsed = block(&["X-Test-Header: test", " test", ""]);
        assert_eq!(
            parsed.headers.get("X-Test-Header").map(String::as_str),
            Some("test\ntest"),
        );
    }

    #[test]
    fn test_repeated_headers_merge() {
        let parsed = block(&["X-Test-Header: test", "X-Test-Header: test 2", ""]);
        assert_eq!(
            parsed.headers.get("X-Test-Header").map(String::as_str),
            Some("test, test 2"),
        );
    }

    #[test]
    fn test_encoded_value_decoded_after_unfolding() {
        let parsed = block(&[
            "Subject: =?ISO-8859-1?B?SWYgeW91IGNhbiByZWFkIHRoaXMgeW8=?=",
            " =?ISO-8859-2?B?dSB1bmRlcnN0YW5kIHRoZSBleGFtcGxlLg==?=",
            "",
        ]);
        assert_eq!(
            parsed.headers.get("Subject").map(String::as_str),
            Some("If you can read this you understand the example."),
        );
    }

    #[test]
    fn test_continuation_before_any_header() {
        assert_eq!(
            parse_block(&[" oops"], 0, 1),
            Err(EmlError::InvalidHeader { line: 1 }),
        );
    }

    #[test]
    fn test_boundary_ends_block_without_blank_line() {
        let lines = [
            "Content-Type: multipart/alternative;",
            "\tboundary=\"frontier\"",
            "--frontier",
            "Content-Type: text/plain",
        ];
        let parsed = parse_block(&lines, 0, lines.len()).unwrap();
        assert_eq!(parsed.body_start, 2);
        assert_eq!(
            parsed.headers.get("Content-Type").map(String::as_str),
            Some("multipart/alternative;\nboundary=\"frontier\""),
        );
    }

    #[test]
    fn test_open_header_closed_at_range_end() {
        let parsed = block(&["To: a@example.com"]);
        assert_eq!(parsed.headers.get("To").map(String::as_str), Some("a@example.com"));
        assert_eq!(parsed.body_start, 1);
    }

    #[test]
    fn test_line_without_colon_is_dropped() {
        let parsed = block(&["Bad entry", "  on multiple lines", "To: a@example.com", ""]);
        assert_eq!(parsed.headers.len(), 1);
        assert_eq!(parsed.headers.get("To").map(String::as_str), Some("a@example.com"));
    }

    #[test]
    fn test_value_opened_on_next_line() {
        let parsed = block(&["Message-Id:", " <1234@local.machine.example>", ""]);
        assert_eq!(
            parsed.headers.get("Message-Id").map(String::as_str),
            Some("\n<1234@local.machine.example>"),
        );
    }
}
