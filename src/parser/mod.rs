//! DataWeave doc comment parser.
//!
//! [`parse_source`] turns the text of one `.dwl` file into a [`SourceFile`].
//! Parsing is best-effort and never fails: blocks that do not match a known
//! shape are left out of the result.

pub mod args;
pub mod comment;
pub mod locate;
pub mod table;

use crate::model::{BodyTable, Function, SourceFile, Variable};

/// Parse one file's text.
///
/// `root` is stripped from the front of `path` to form the stored identity;
/// `ext` is recorded as-is.
pub fn parse_source(text: &str, root: &str, path: &str, ext: &str) -> SourceFile {
    let module = locate::module_comment(text).map(|block| comment::parse(block.body));
    let module_table = module.as_ref().and_then(|c| table::build(&c.annotations));

    let function_blocks = locate::functions(text);
    let variable_blocks = locate::variables(text);

    let consumed: Vec<usize> = function_blocks
        .iter()
        .map(|b| b.start)
        .chain(variable_blocks.iter().map(|b| b.start))
        .collect();

    let functions: Vec<Function> = function_blocks
        .into_iter()
        .map(|block| {
            let comment = comment::parse(block.comment);
            Function {
                name: block.name.to_string(),
                table: table::build(&comment.annotations),
                comment,
                arguments: args::parse(block.args),
            }
        })
        .collect();

    let variables: Vec<Variable> = variable_blocks
        .into_iter()
        .map(|block| Variable {
            name: block.name.to_string(),
            comment: comment::parse(block.comment),
        })
        .collect();

    let tables: Vec<BodyTable> = locate::body_comments(text, &consumed)
        .into_iter()
        .map(|block| {
            let comment = comment::parse(block.body);
            BodyTable {
                table: table::build(&comment.annotations),
                comment,
            }
        })
        .collect();

    let file = SourceFile {
        path: relative_path(root, path),
        ext: ext.to_string(),
        comment: module,
        table: module_table,
        variables,
        functions,
        tables,
    };

    let attached = usize::from(file.comment.is_some())
        + file.functions.len()
        + file.variables.len()
        + file.tables.len();
    tracing::debug!(
        path = %file.path,
        functions = file.functions.len(),
        variables = file.variables.len(),
        tables = file.tables.len(),
        unattached = locate::comments(text).len().saturating_sub(attached),
        "parsed source file"
    );

    file
}

/// Strip `root` from the front of `path`.
///
/// Paths outside `root` are kept whole.
pub fn relative_path(root: &str, path: &str) -> String {
    if root.is_empty() {
        return path.to_string();
    }
    path.strip_prefix(root).unwrap_or(path).to_string()
}
