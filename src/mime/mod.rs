/// Transfer-Encoding mechanisms and body decoding
pub mod mechanism;

/// Generic `primary; key=value` header value syntax
pub mod parameter;

/// Content-Type representation and category dispatch
pub mod r#type;
