/// Strip one matching pair of surrounding double quotes.
///
/// Unbalanced quotes are left alone so `"half` survives untouched.
pub fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unquote_pair() {
        assert_eq!(unquote("\"simple boundary\""), "simple boundary");
    }

    #[test]
    fn test_unquote_bare() {
        assert_eq!(unquote("boundary"), "boundary");
    }

    #[test]
    fn test_unquote_unbalanced() {
        assert_eq!(unquote("\"half"), "\"half");
        assert_eq!(unquote("half\""), "half\"");
        assert_eq!(unquote("\""), "\"");
    }

    #[test]
    fn test_unquote_single_pair_only() {
        assert_eq!(unquote("\"\"x\"\""), "\"x\"");
    }
}
