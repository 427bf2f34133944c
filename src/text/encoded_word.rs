use base64::{engine::general_purpose, Engine as _};
use encoding_rs::Encoding;
use nom::{
    bytes::complete::{tag, take_while, take_while1},
    character::complete::one_of,
    error::{Error, ErrorKind},
    sequence::tuple,
    IResult,
};

/// One RFC 2047 encoded word: `=?charset?B|Q?payload?=`.
///
/// The charset label may carry an RFC 2231 language tag (`utf-8*en`), which
/// is ignored. Unknown labels fall back to windows-1252 — inside header
/// text a lossy decode beats losing the word.
pub fn encoded_word(input: &str) -> IResult<&str, String> {
    let (rest, (_, charset, _, scheme, _, payload, _)) = tuple((
        tag("=?"),
        take_while1(is_label_char),
        tag("?"),
        one_of("BbQq"),
        tag("?"),
        take_while(is_payload_char),
        tag("?="),
    ))(input)?;

    let label = charset.split('*').next().unwrap_or(charset);
    let enc = Encoding::for_label(label.as_bytes()).unwrap_or(encoding_rs::WINDOWS_1252);

    let bytes = match scheme {
        'B' | 'b' => general_purpose::STANDARD_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|_| nom::Err::Error(Error::new(input, ErrorKind::Verify)))?,
        _ => q_decode(payload),
    };

    let (text, _, _) = enc.decode(&bytes);
    Ok((rest, text.into_owned()))
}

fn is_label_char(c: char) -> bool {
    !c.is_ascii_whitespace() && c != '?'
}

fn is_payload_char(c: char) -> bool {
    !c.is_ascii_whitespace() && c != '?'
}

/// RFC 2047 section 4.2: `_` is a space, `=XX` a raw octet.
fn q_decode(payload: &str) -> Vec<u8> {
    let bytes = payload.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'_' => {
                out.push(b' ');
                i += 1;
            }
            b'=' => match (hex_val(bytes.get(i + 1)), hex_val(bytes.get(i + 2))) {
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

/// Decode every encoded word inside a header value.
///
/// Plain text passes through untouched. Whitespace between two adjacent
/// encoded words is folding noise and is dropped; a word that fails to
/// decode is kept verbatim.
pub fn decode_words(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    let mut last_was_encoded = false;
    while let Some(idx) = rest.find("=?") {
        let (before, candidate) = rest.split_at(idx);
        match encoded_word(candidate) {
            Ok((after, decoded)) => {
                let folding = last_was_encoded && before.chars().all(|c| c.is_ascii_whitespace());
                if !folding {
                    out.push_str(before);
                }
                out.push_str(&decoded);
                last_was_encoded = true;
                rest = after;
            }
            Err(_) => {
                out.push_str(before);
                out.push_str("=?");
                last_was_encoded = false;
                rest = &candidate[2..];
            }
        }
    }
    out.push_str(rest);
    out
}
