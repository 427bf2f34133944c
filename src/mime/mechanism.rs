use base64::{engine::general_purpose, Engine as _};

use crate::error::EmlError;
use crate::part::node::Leaf;
use crate::text::charset;

/// A `Content-Transfer-Encoding` mechanism (RFC 2045 section 6).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mechanism {
    SevenBit,
    EightBit,
    Binary,
    QuotedPrintable,
    Base64,
    Other(String),
}

impl Mechanism {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "7bit" => Self::SevenBit,
            "8bit" => Self::EightBit,
            "binary" => Self::Binary,
            "quoted-printable" => Self::QuotedPrintable,
            "base64" => Self::Base64,
            other => Self::Other(other.to_string()),
        }
    }

    /// Reverse this transfer encoding over the raw body lines.
    ///
    /// Base64 concatenates the lines with no separator, undoing transport
    /// wrapping; everything else works on the newline-joined text. A
    /// resolved charset turns decoded bytes into text; without one the
    /// bytes stay raw. `line` is the 1-based number of the first body
    /// line, reported on failure.
    pub fn decode(
        &self,
        lines: &[&str],
        charset_label: Option<&str>,
        line: usize,
    ) -> Result<Leaf, EmlError> {
        match self {
            Self::Base64 => {
                let joined = lines.concat();
                let bytes = general_purpose::STANDARD
                    .decode(joined.trim())
                    .map_err(|e| EmlError::Decode {
                        line,
                        reason: e.to_string(),
                    })?;
                into_leaf(bytes, charset_label, line)
            }
            Self::QuotedPrintable => {
                let joined = lines.join("\n");
                into_leaf(qp_decode(joined.as_bytes()), charset_label, line)
            }
            _ => Ok(Leaf::Txt(lines.join("\n"))),
        }
    }
}

fn into_leaf(bytes: Vec<u8>, charset_label: Option<&str>, line: usize) -> Result<Leaf, EmlError> {
    match charset_label {
        Some(label) => charset::decode(&bytes, label)
            .map(Leaf::Txt)
            .ok_or_else(|| EmlError::Decode {
                line,
                reason: format!("unknown charset {label:?}"),
            }),
        None => Ok(Leaf::Bin(bytes)),
    }
}

/// Decode `=XX` escapes and drop soft line breaks (`=` before a newline).
///
/// Malformed escapes pass through literally. Carriage returns are gone
/// before this runs, so a soft break is exactly `=\n`.
fn qp_decode(src: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(src.len());
    let mut i = 0;
    while i < src.len() {
        match src[i] {
            b'=' if src.get(i + 1) == Some(&b'\n') => i += 2,
            b'=' => match (hex_val(src.get(i + 1)), hex_val(src.get(i + 2))) {
                (Some(hi), Some(lo)) => {
                    out.push(hi << 4 | lo);
                    i += 3;
                }
                _ => {
                    out.push(b'=');
                    i += 1;
                }
            },
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    out
}

fn hex_val(b: Option<&u8>) -> Option<u8> {
    b.and_then(|b| (*b as char).to_digit(16)).map(|v| v as u8)
}
