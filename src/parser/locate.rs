//! Block locators: find documented regions in a `.dwl` file.
//!
//! Each locator scans the full text on its own and returns byte offsets plus
//! the captured slices; decomposing the comment text is left to the caller.
//! A doc comment is `/** ... */`; comments that do not sit in front of a
//! recognized declaration are ignored by the declaration locators.

use regex::Regex;
use std::sync::LazyLock;

/// `/** body */` — body excludes the delimiters and any run of closing stars.
/// The body may not start with `/`, so the empty block comment `/**/` is not
/// an opener.
const DOC_COMMENT: &str = r"/\*\*((?:(?:[^*/]|\*+[^*/])(?:[^*]|\*+[^*/])*)?)\*+/";

/// Marker separating header declarations from the script body.
pub const BODY_SEPARATOR: &str = "---";

/// DataWeave version pragma that follows the module comment.
const VERSION_PRAGMA: &str = "%dw";

static RE_DOC_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(DOC_COMMENT).unwrap());

static RE_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"{DOC_COMMENT}\s*fun\b\s*(\w*)\s*\(([^)]*)\)")).unwrap()
});

static RE_VARIABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"{DOC_COMMENT}\s*var\b\s*(\w*)")).unwrap());

/// A bare doc comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentBlock<'a> {
    /// Offset of the opening `/**`
    pub start: usize,
    pub body: &'a str,
}

/// A doc comment followed by `fun name(args)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionBlock<'a> {
    pub start: usize,
    pub comment: &'a str,
    pub name: &'a str,
    pub args: &'a str,
}

/// A doc comment followed by `var name`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableBlock<'a> {
    pub start: usize,
    pub comment: &'a str,
    pub name: &'a str,
}

/// Every doc comment in `text`, in order.
pub fn comments(text: &str) -> Vec<CommentBlock<'_>> {
    RE_DOC_COMMENT
        .captures_iter(text)
        .map(|caps| CommentBlock {
            start: caps.get(0).map_or(0, |m| m.start()),
            body: caps.get(1).map_or("", |m| m.as_str()),
        })
        .collect()
}

/// The first doc comment directly followed by the `%dw` pragma.
pub fn module_comment(text: &str) -> Option<CommentBlock<'_>> {
    RE_DOC_COMMENT.captures_iter(text).find_map(|caps| {
        let whole = caps.get(0)?;
        if !text[whole.end()..].trim_start().starts_with(VERSION_PRAGMA) {
            return None;
        }
        Some(CommentBlock {
            start: whole.start(),
            body: caps.get(1)?.as_str(),
        })
    })
}

/// Every doc comment directly followed by a `fun` declaration.
pub fn functions(text: &str) -> Vec<FunctionBlock<'_>> {
    RE_FUNCTION
        .captures_iter(text)
        .filter_map(|caps| {
            Some(FunctionBlock {
                start: caps.get(0)?.start(),
                comment: caps.get(1)?.as_str(),
                name: caps.get(2)?.as_str(),
                args: caps.get(3)?.as_str(),
            })
        })
        .collect()
}

/// Every doc comment directly followed by a `var` declaration.
pub fn variables(text: &str) -> Vec<VariableBlock<'_>> {
    RE_VARIABLE
        .captures_iter(text)
        .filter_map(|caps| {
            Some(VariableBlock {
                start: caps.get(0)?.start(),
                comment: caps.get(1)?.as_str(),
                name: caps.get(2)?.as_str(),
            })
        })
        .collect()
}

/// Doc comments after the first `---`, skipping any that start at one of the
/// `consumed` offsets (comments already attached to a declaration).
///
/// Without a body separator there is no body and the result is empty.
pub fn body_comments<'a>(text: &'a str, consumed: &[usize]) -> Vec<CommentBlock<'a>> {
    let Some(idx) = text.find(BODY_SEPARATOR) else {
        return Vec::new();
    };
    let offset = idx + BODY_SEPARATOR.len();

    comments(&text[offset..])
        .into_iter()
        .map(|block| CommentBlock {
            start: block.start + offset,
            body: block.body,
        })
        .filter(|block| !consumed.contains(&block.start))
        .collect()
}
