use crate::error::EmlError;
use crate::header;
use crate::mime::mechanism::Mechanism;
use crate::mime::r#type::{Category, ContentType};
use crate::part::node::{AnyBody, Leaf, Node};

/// Nesting bound for `message/*` and `multipart/*` recursion. Tracked
/// explicitly so adversarial nesting fails cleanly instead of blowing the
/// call stack.
pub const MAX_DEPTH: usize = 99;

/// Build one node from `lines[start..end]`.
///
/// `lookahead` is the index of the enclosing multipart scope's next
/// boundary line, when the caller has one: it bounds a nested leaf's body
/// so the part's trailing blank line stays out, without re-scanning.
///
/// Returns the node and the line index at which the caller's scan resumes
/// (the caller advances past it).
pub fn build(
    depth: usize,
    lines: &[&str],
    start: usize,
    end: usize,
    lookahead: Option<usize>,
) -> Result<(Node, usize), EmlError> {
    if depth > MAX_DEPTH {
        return Err(EmlError::MaxDepthExceeded { line: start + 1 });
    }

    let header::HeaderBlock {
        headers,
        body_start,
    } = header::parse_block(lines, start, end)?;

    let raw_type = headers
        .get("Content-Type")
        .map(String::as_str)
        .unwrap_or("text/plain");
    let content_type =
        ContentType::parse(raw_type).ok_or_else(|| EmlError::InvalidContentType {
            line: body_start,
            value: raw_type.to_string(),
        })?;

    #[cfg(feature = "tracing")]
    tracing::trace!(depth, start, end, ctype = %content_type.ctype, "building node");

    match content_type.category() {
        Category::Message => {
            let child_end = lookahead.unwrap_or(end);
            let (child, resume) = build(depth + 1, lines, body_start, child_end, None)?;
            let node = Node {
                content_type,
                headers,
                body: AnyBody::Msg(Box::new(child)),
            };
            Ok((node, resume))
        }
        Category::Multipart => {
            let boundary = content_type
                .parameters
                .get("boundary")
                .filter(|b| !b.is_empty())
                .cloned()
                .ok_or(EmlError::MissingBoundary { line: start + 1 })?;
            let delimiter = format!("--{boundary}");
            let terminator = format!("{delimiter}--");

            let mut children = Vec::new();
            let mut finished = false;
            let mut idx = body_start;
            while idx < end {
                let line = lines[idx];
                if line.starts_with(&terminator) {
                    finished = true;
                    break;
                }
                if line.starts_with(&delimiter) {
                    let next_boundary =
                        (idx + 1..end).find(|&i| lines[i].starts_with(&delimiter));
                    let (child, resume) = build(depth + 1, lines, idx + 1, end, next_boundary)?;
                    children.push(child);
                    idx = resume;
                }
                idx += 1;
            }
            if !finished {
                return Err(EmlError::ReachedEnd {
                    line: idx + 1,
                    boundary,
                });
            }

            let node = Node {
                content_type,
                headers,
                body: AnyBody::Mult(children),
            };
            Ok((node, idx))
        }
        Category::Discrete => {
            let body_end = lookahead.unwrap_or(end);
            let body_lines = &lines[body_start.min(body_end)..body_end];
            let leaf = match headers.get("Content-Transfer-Encoding") {
                Some(label) => Mechanism::from_label(label).decode(
                    body_lines,
                    content_type.charset.as_deref(),
                    body_start + 1,
                )?,
                None => Leaf::Txt(body_lines.join("\n")),
            };
            let node = Node {
                content_type,
                headers,
                body: AnyBody::Leaf(leaf),
            };
            Ok((node, body_end.saturating_sub(1)))
        }
    }
}
