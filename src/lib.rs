#![doc = include_str!("../README.md")]

pub mod error;
pub mod header;
pub mod imf;
pub mod mime;
pub mod part;
pub mod text;

pub use error::EmlError;
pub use header::Headers;
pub use imf::mailbox::Mailbox;
pub use imf::{Attachment, Mail};
pub use mime::r#type::ContentType;
pub use part::node::{AnyBody, Leaf, Node};

/// Parse a whole RFC 822 / MIME message into its body-part tree.
///
/// Carriage returns are stripped once up front, the text is split into
/// lines, and the tree is built recursively over the full range.
pub fn parse(input: &str) -> Result<Node, EmlError> {
    let normalized = input.replace('\r', "");
    let lines: Vec<&str> = normalized.split('\n').collect();
    let (node, _) = part::builder::build(1, &lines, 0, lines.len(), None)?;
    Ok(node)
}

/// Parse a message and fold it into a [`Mail`] summary.
///
/// To fold an already-parsed tree, use [`imf::extract_mail`] directly.
pub fn extract(input: &str) -> Result<Mail, EmlError> {
    Ok(imf::extract_mail(&parse(input)?))
}

/// Scan only the top-level header block, skipping the body entirely.
pub fn parse_headers(input: &str) -> Result<Headers, EmlError> {
    let normalized = input.replace('\r', "");
    let lines: Vec<&str> = normalized.split('\n').collect();
    let block = header::parse_block(&lines, 0, lines.len())?;
    Ok(block.headers)
}

/// Extract only the header-derived mail fields (addresses, subject, date),
/// leaving body-derived fields empty.
///
/// For an existing header map, use [`imf::extract_from_headers`].
pub fn extract_headers(input: &str) -> Result<Mail, EmlError> {
    Ok(imf::extract_from_headers(&parse_headers(input)?))
}
