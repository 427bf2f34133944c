use charset::Charset;

/// Decode `bytes` according to the IANA charset `label`.
///
/// Labels are resolved through the WHATWG registry via the `charset` crate,
/// which also knows the mail-specific names (`us-ascii`, UTF-7) that
/// encoding_rs alone does not. Returns `None` for an unrecognized label;
/// malformed sequences decode to U+FFFD rather than failing.
pub fn decode(bytes: &[u8], label: &str) -> Option<String> {
    let charset = Charset::for_label_no_replacement(label.trim().as_bytes())?;
    let (text, _, _) = charset.decode(bytes);
    Some(text.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf8() {
        assert_eq!(
            decode("Accusé de réception".as_bytes(), "utf-8"),
            Some("Accusé de réception".to_string()),
        );
    }

    #[test]
    fn test_decode_latin1() {
        assert_eq!(
            decode(b"Accus\xe9", "iso-8859-1"),
            Some("Accusé".to_string()),
        );
    }

    #[test]
    fn test_decode_us_ascii() {
        assert_eq!(decode(b"plain", "us-ascii"), Some("plain".to_string()));
    }

    #[test]
    fn test_unknown_label() {
        assert_eq!(decode(b"plain", "klingon-8"), None);
    }

    #[test]
    fn test_malformed_replaced() {
        assert_eq!(decode(b"a\xffb", "utf-8"), Some("a\u{fffd}b".to_string()));
    }
}
