//! `@table` / `@row` annotation tables.
//!
//! ```text
//! @table Source, Target, Notes
//! @row id, customerId, copied as-is
//! @row name, fullName, first\\, last
//! ```
//!
//! A comma preceded by two backslashes is literal. Row fields have the escape
//! replaced by a plain comma; column names keep it.

use crate::model::{Annotation, AnnotationTable, Row};

const ESCAPE: &str = "\\\\";
const ESCAPED_COMMA: &str = "\\\\,";

/// Build the annotation table of a comment, if it declares one.
///
/// Only the first `@table` counts. Every `@row` is collected in source order,
/// including rows written before the `@table` line. Rows are not checked
/// against the column count.
pub fn build(annotations: &[Annotation]) -> Option<AnnotationTable> {
    let header = annotations.iter().find(|a| a.is("table"))?;

    let columns = split_escaped(&header.value)
        .into_iter()
        .map(strip_line_breaks)
        .collect();

    let rows = annotations
        .iter()
        .filter(|a| a.is("row"))
        .map(|a| Row {
            fields: split_escaped(&a.value)
                .into_iter()
                .map(|f| strip_line_breaks(&f.replace(ESCAPED_COMMA, ",")))
                .collect(),
        })
        .collect();

    Some(AnnotationTable { columns, rows })
}

/// Split on commas that are not preceded by the `\\` escape.
///
/// Shared by columns and rows so both use the same escape rule. Fields are
/// returned verbatim, escapes included.
pub fn split_escaped(value: &str) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut start = 0;
    for (i, _) in value.match_indices(',') {
        if value[..i].ends_with(ESCAPE) {
            continue;
        }
        fields.push(&value[start..i]);
        start = i + 1;
    }
    fields.push(&value[start..]);
    fields
}

fn strip_line_breaks(text: &str) -> String {
    text.replace(['\r', '\n'], "")
}
