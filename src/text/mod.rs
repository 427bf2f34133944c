/// Stateless charset decoding for body payloads
pub mod charset;

/// RFC 2047 encoded words in header values
pub mod encoded_word;

/// Double-quote stripping for parameter values and display names
pub mod quoted;
