use std::collections::BTreeMap;

use crate::text::encoded_word::decode_words;
use crate::text::quoted::unquote;

/// A `primary; key=value; ...` header value, as used by `Content-Type`
/// and `Content-Disposition`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameterized {
    /// Lower-cased first segment.
    pub primary: String,
    /// Keys lower-cased, values unquoted and MIME-word-decoded.
    pub parameters: BTreeMap<String, String>,
}

/// Split a structured header value into its primary token and parameters.
///
/// Returns `None` when the value contains a literal comma: that is two
/// merged header values, and guessing which half to keep would be wrong
/// either way. Everything after the first `=` of a segment belongs to the
/// value, so embedded `=` survives. A segment without `=` is a bare flag
/// stored with an empty value.
pub fn parse(value: &str) -> Option<Parameterized> {
    if value.contains(',') {
        return None;
    }

    let mut segments = value.split(';').map(str::trim);
    let primary = segments.next().unwrap_or("").to_ascii_lowercase();

    let mut parameters = BTreeMap::new();
    for segment in segments {
        if segment.is_empty() {
            continue;
        }
        match segment.split_once('=') {
            Some((name, value)) => {
                parameters.insert(
                    name.trim().to_ascii_lowercase(),
                    decode_words(unquote(value.trim())),
                );
            }
            None => {
                parameters.insert(segment.to_ascii_lowercase(), String::new());
            }
        }
    }

    Some(Parameterized {
        primary,
        parameters,
    })
}
