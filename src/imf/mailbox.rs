use crate::text::encoded_word::decode_words;
use crate::text::quoted::unquote;

/// One mailbox out of an address header (`From`, `To`, `Cc`, `Bcc`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mailbox {
    /// Decoded display name, when the segment came in `name <addr>` form.
    pub name: Option<String>,
    pub address: String,
    /// Canonical `"name" <address>` when a name was present, else the
    /// original trimmed segment.
    pub raw: String,
}

/// Parse a whole address header value into mailboxes.
pub fn address_list(value: &str) -> Vec<Mailbox> {
    split_addresses(value).into_iter().filter_map(mailbox).collect()
}

/// Split on commas that sit outside double quotes, so a display name like
/// `"last, first"` stays in one piece.
fn split_addresses(value: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut in_quotes = false;
    let mut segment_start = 0;
    for (i, c) in value.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                segments.push(&value[segment_start..i]);
                segment_start = i + 1;
            }
            _ => {}
        }
    }
    segments.push(&value[segment_start..]);
    segments
}

/// Parse one comma-free segment.
///
/// The last `<...>` pair wins; text before it is the display name. Without
/// a bracket pair the whole trimmed segment is the address.
fn mailbox(segment: &str) -> Option<Mailbox> {
    let segment = segment.trim();
    if segment.is_empty() {
        return None;
    }
    match bracket_pair(segment) {
        Some((open, close)) => {
            let address = unquote(segment[open + 1..close].trim()).to_string();
            let name = decode_words(unquote(segment[..open].trim()));
            if name.is_empty() {
                Some(Mailbox {
                    name: None,
                    address,
                    raw: segment.to_string(),
                })
            } else {
                let raw = format!("\"{name}\" <{address}>");
                Some(Mailbox {
                    name: Some(name),
                    address,
                    raw,
                })
            }
        }
        None => Some(Mailbox {
            name: None,
            address: segment.to_string(),
            raw: segment.to_string(),
        }),
    }
}

fn bracket_pair(segment: &str) -> Option<(usize, usize)> {
    let open = segment.rfind('<')?;
    let close = segment[open..].find('>')? + open;
    Some((open, close))
}
