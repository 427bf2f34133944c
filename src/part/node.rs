use crate::header::Headers;
use crate::mime::r#type::ContentType;

/// Decoded payload of a discrete part.
///
/// Text when the resolved content type carried a charset (every `text/*`
/// does), raw bytes otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Leaf {
    Txt(String),
    Bin(Vec<u8>),
}

/// Body of a node. The variant is fixed by the content-type category when
/// the node is built and never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnyBody {
    /// `multipart/*`: children in source order; may be empty.
    Mult(Vec<Node>),
    /// `message/*` (except `message/delivery-status`): the enclosed message.
    Msg(Box<Node>),
    /// Everything else.
    Leaf(Leaf),
}

/// One node of the body-part tree. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub content_type: ContentType,
    pub headers: Headers,
    pub body: AnyBody,
}
