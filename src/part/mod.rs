/// Recursive descent over line ranges
pub mod builder;

/// The body-part tree model
pub mod node;
