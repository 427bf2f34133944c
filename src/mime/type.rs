use std::collections::BTreeMap;

use crate::mime::parameter::{self, Parameterized};

/// A parsed `Content-Type` value with its resolved charset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentType {
    /// Lower-cased `type/subtype`.
    pub ctype: String,
    /// Charset the body text is declared in; `None` for binary payloads.
    ///
    /// `text/*` without an explicit `charset` parameter defaults to
    /// `utf-8`; an explicit parameter has its RFC 2231 language tag
    /// (`utf-8*en`) stripped.
    pub charset: Option<String>,
    pub parameters: BTreeMap<String, String>,
}

/// Dispatch category driving the shape of a node's body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// `message/*`, except `message/delivery-status`: one enclosed message.
    Message,
    /// `multipart/*`: ordered sibling parts between boundary lines.
    Multipart,
    /// Everything else: a decoded leaf.
    Discrete,
}

impl ContentType {
    /// Parse a raw `Content-Type` header value.
    ///
    /// `None` mirrors [`parameter::parse`]: a literal comma makes the value
    /// ambiguous and unusable.
    pub fn parse(value: &str) -> Option<Self> {
        let Parameterized {
            primary,
            parameters,
        } = parameter::parse(value)?;

        let charset = match parameters.get("charset") {
            Some(label) => Some(label.split('*').next().unwrap_or(label).to_string()),
            None if primary.starts_with("text/") => Some("utf-8".to_string()),
            None => None,
        };

        Some(ContentType {
            ctype: primary,
            charset,
            parameters,
        })
    }

    pub fn category(&self) -> Category {
        if self.ctype.starts_with("message") && self.ctype != "message/delivery-status" {
            Category::Message
        } else if self.ctype.starts_with("multipart/") {
            Category::Multipart
        } else {
            Category::Discrete
        }
    }
}
