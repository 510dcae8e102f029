//! Doc comment decomposition: decoration stripping, description/annotation
//! split, and `@name value` tokenizing.
//!
//! Every function here is total. Text that does not look like an annotation
//! is either kept as description or dropped, never reported as an error.

use crate::model::{Annotation, Comment};

/// Build a [`Comment`] from the raw text between `/**` and `*/`.
pub fn parse(raw: &str) -> Comment {
    let normalized = normalize(raw);
    let (description, block) = split_annotations(normalized.trim());
    Comment {
        text: description.trim().to_string(),
        annotations: tokenize(block),
    }
}

/// Strip the ` * ` continuation decoration from every line.
///
/// Lines without a leading `*` are kept as-is. Line breaks are preserved,
/// surrounding whitespace of the whole block is left to the caller.
pub fn normalize(raw: &str) -> String {
    raw.lines()
        .map(strip_decoration)
        .collect::<Vec<_>>()
        .join("\n")
}

fn strip_decoration(line: &str) -> &str {
    match line.trim_start().strip_prefix('*') {
        Some(rest) => rest.trim_start(),
        None => line,
    }
}

/// Split normalized text at the first line that starts with `@`.
///
/// Returns `(description, annotation_block)`. An `@` anywhere other than the
/// first column stays in the description.
pub fn split_annotations(text: &str) -> (&str, &str) {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if line.starts_with('@') {
            return (&text[..offset], &text[offset..]);
        }
        offset += line.len();
    }
    (text, "")
}

/// Split an annotation block into entries in document order.
///
/// An entry starts at a line of the form `@word<whitespace>` and runs until
/// the next line starting with `@` or the end of the block. Lines starting
/// with `@` that are not well-formed heads still end the previous entry.
pub fn tokenize(block: &str) -> Vec<Annotation> {
    let mut annotations = Vec::new();
    let mut current: Option<(&str, String)> = None;

    for line in block.lines() {
        if line.starts_with('@') {
            if let Some((name, raw)) = current.take() {
                annotations.push(build(name, raw));
            }
            current = annotation_head(line).map(|(name, rest)| (name, rest.to_string()));
            continue;
        }
        if let Some((_, raw)) = current.as_mut() {
            raw.push('\n');
            raw.push_str(line);
        }
    }
    if let Some((name, raw)) = current {
        annotations.push(build(name, raw));
    }

    annotations
}

/// Parse `@name rest` into `(name, rest)`.
///
/// The name is a run of word characters and must be followed by a single
/// whitespace character or the end of the line.
fn annotation_head(line: &str) -> Option<(&str, &str)> {
    let body = line.strip_prefix('@')?;
    let name_len = body
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(body.len());
    if name_len == 0 {
        return None;
    }
    let (name, tail) = body.split_at(name_len);
    let mut chars = tail.chars();
    match chars.next() {
        None => Some((name, "")),
        Some(c) if c.is_whitespace() => Some((name, chars.as_str())),
        Some(_) => None,
    }
}

fn build(name: &str, mut raw: String) -> Annotation {
    // Line break closing the entry; lets a bare `@param key` keep its key.
    raw.push('\n');

    if name.eq_ignore_ascii_case("param") {
        let (key, value) = split_param(&raw);
        return Annotation {
            name: name.to_string(),
            key: key.map(str::to_string),
            value: value.to_string(),
        };
    }

    Annotation {
        name: name.to_string(),
        key: None,
        value: raw.trim().to_string(),
    }
}

/// Split a `@param` value into `(key, description)` at the first whitespace run.
///
/// Without any whitespace after the first token the value stays unsplit.
pub fn split_param(raw: &str) -> (Option<&str>, &str) {
    let text = raw.trim_start();
    match text.find(char::is_whitespace) {
        Some(idx) => (Some(&text[..idx]), text[idx..].trim()),
        None => (None, text.trim()),
    }
}
