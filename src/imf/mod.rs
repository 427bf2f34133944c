//! Semantic mail summary derived from a parsed body-part tree.

/// Date header parsing
pub mod datetime;

/// Address header parsing
pub mod mailbox;

use chrono::{DateTime, FixedOffset};

use crate::header::Headers;
use crate::mime::parameter;
use crate::mime::r#type::ContentType;
use crate::part::node::{AnyBody, Leaf, Node};

use self::mailbox::Mailbox;

/// A body part surfaced as an attachment: any binary leaf, or any leaf
/// whose `Content-Disposition` says `attachment`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub content_type: ContentType,
    pub body: Leaf,
    /// `Content-Id` with surrounding angle brackets stripped.
    pub content_id: Option<String>,
    /// Resolved from the disposition `filename` parameter, the content
    /// type's `name` parameter, or `Content-Description`, in that order.
    pub filename: Option<String>,
}

/// What a message says and carries, independent of its MIME layout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mail {
    pub subject: Option<String>,
    pub date: Option<DateTime<FixedOffset>>,
    pub from: Option<Mailbox>,
    pub to: Option<Vec<Mailbox>>,
    pub cc: Option<Vec<Mailbox>>,
    pub bcc: Option<Vec<Mailbox>>,
    /// Aggregated plaintext body, trimmed; empty when there is none.
    pub text: String,
    /// Aggregated HTML body, trimmed; empty when there is none.
    pub html: String,
    /// Aggregated AMP-for-Email body; unset when empty after trimming.
    pub amp: Option<String>,
    pub attachments: Vec<Attachment>,
}

/// Fold a finished tree into a [`Mail`]. Pure and total: a tree that
/// parsed always extracts.
pub fn extract_mail(node: &Node) -> Mail {
    let mut mail = from_headers(&node.headers);
    let folded = fold_body(node);

    mail.text = folded.text.trim().to_string();
    mail.html = folded.html.trim().to_string();
    let amp = folded.amp.trim();
    mail.amp = (!amp.is_empty()).then(|| amp.to_string());
    mail.attachments = folded.attachments;
    mail
}

/// Build a [`Mail`] from a header map alone: addresses, subject and date.
/// Body-derived fields stay empty.
pub fn extract_from_headers(headers: &Headers) -> Mail {
    from_headers(headers)
}

fn from_headers(headers: &Headers) -> Mail {
    let mut mail = Mail::default();
    if let Some(value) = headers.get("To") {
        mail.to = Some(mailbox::address_list(value));
    }
    if let Some(value) = headers.get("Cc") {
        mail.cc = Some(mailbox::address_list(value));
    }
    if let Some(value) = headers.get("Bcc") {
        mail.bcc = Some(mailbox::address_list(value));
    }
    if let Some(value) = headers.get("From") {
        mail.from = mailbox::address_list(value).into_iter().next();
    }
    if let Some(value) = headers.get("Subject") {
        mail.subject = Some(value.clone());
    }
    if let Some(value) = headers.get("Date") {
        mail.date = datetime::parse(value);
    }
    mail
}

#[derive(Default)]
struct Folded {
    text: String,
    html: String,
    amp: String,
    attachments: Vec<Attachment>,
}

fn fold_body(node: &Node) -> Folded {
    let mut out = Folded::default();
    match &node.body {
        AnyBody::Leaf(leaf) => {
            let disposition = node.headers.get("Content-Disposition");
            let is_attachment = matches!(leaf, Leaf::Bin(_))
                || disposition.map(|d| primary_token(d) == "attachment").unwrap_or(false);
            if is_attachment {
                out.attachments.push(attachment(node, leaf, disposition));
            } else if let Leaf::Txt(text) = leaf {
                match node.content_type.ctype.as_str() {
                    "text/html" => out.html = text.clone(),
                    "text/x-amp-html" => out.amp = text.clone(),
                    t if t.starts_with("text/") => out.text = text.clone(),
                    // Inline non-text leaves contribute nothing.
                    _ => {}
                }
            }
        }
        AnyBody::Msg(child) => return fold_body(child),
        AnyBody::Mult(children) => {
            for child in children {
                let folded = fold_body(child);
                append(&mut out.text, &folded.text);
                append(&mut out.html, &folded.html);
                append(&mut out.amp, &folded.amp);
                out.attachments.extend(folded.attachments);
            }
        }
    }
    out
}

fn append(acc: &mut String, contribution: &str) {
    if !contribution.is_empty() {
        acc.push_str(contribution);
        acc.push('\n');
    }
}

fn attachment(node: &Node, leaf: &Leaf, disposition: Option<&String>) -> Attachment {
    let content_id = node
        .headers
        .get("Content-Id")
        .map(|id| strip_angle_brackets(id));
    let filename = disposition
        .and_then(|d| parameter::parse(d))
        .and_then(|p| p.parameters.get("filename").cloned())
        .or_else(|| node.content_type.parameters.get("name").cloned())
        .or_else(|| node.headers.get("Content-Description").cloned());
    Attachment {
        content_type: node.content_type.clone(),
        body: leaf.clone(),
        content_id,
        filename,
    }
}

/// First `;`-segment, trimmed and lower-cased. Deliberately lenient: a
/// disposition value the parameter grammar rejects can still name itself.
fn primary_token(value: &str) -> String {
    value
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase()
}

fn strip_angle_brackets(value: &str) -> String {
    match (value.find('<'), value.find('>')) {
        (Some(start), Some(end)) if start < end => value[start + 1..end].to_string(),
        _ => value.trim().to_string(),
    }
}
