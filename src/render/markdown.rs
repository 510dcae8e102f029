//! GitHub-flavored markdown renderer.
//!
//! One `##` section per module with `###` groups for variables, functions and
//! body tables. Annotation tables become markdown tables.

use crate::model::*;
use crate::render::{order_files, RenderOptions, Renderer};
use crate::toc;
use anyhow::Result;

pub struct MarkdownRenderer;

/// Annotations rendered through a dedicated section instead of the bullet list.
const STRUCTURED: &[&str] = &["param", "table", "row"];

impl Renderer for MarkdownRenderer {
    fn render(&self, files: &[SourceFile], opts: &RenderOptions) -> Result<String> {
        let ordered = order_files(files, &opts.module_list);
        let mut output = String::new();

        if !opts.header_text.is_empty() {
            output.push_str(&opts.header_text);
            output.push_str("\n\n");
        }

        if opts.header_table {
            output.push_str(&render_module_index(&ordered));
            output.push('\n');
        }

        for file in &ordered {
            output.push_str(&render_file(file));
            output.push('\n');
        }

        if !opts.footer_text.is_empty() {
            output.push_str(&opts.footer_text);
            output.push('\n');
        }

        Ok(output)
    }

    fn file_extension(&self) -> &str {
        "md"
    }
}

fn render_module_index(files: &[&SourceFile]) -> String {
    let mut lines = vec!["| Module | Description |".to_string(), "|---|---|".to_string()];
    for file in files {
        let summary = file
            .comment
            .as_ref()
            .and_then(|c| c.text.lines().next())
            .unwrap_or("");
        lines.push(format!(
            "| {} | {} |",
            toc::render_toc_link(&file.module_name()),
            escape_cell(summary)
        ));
    }
    lines.push(String::new());
    lines.join("\n")
}

/// Render a single module's documentation.
fn render_file(file: &SourceFile) -> String {
    let mut lines: Vec<String> = vec![format!("## {}\n", file.module_name())];

    if let Some(ref comment) = file.comment {
        render_comment(&mut lines, comment, STRUCTURED);
    }
    if let Some(ref table) = file.table {
        render_table(&mut lines, table);
    }

    if !file.variables.is_empty() {
        lines.push("### Variables\n".to_string());
        for var in &file.variables {
            lines.push(format!("#### {}\n", var.name));
            // Variables carry no table; their annotations are all listed
            render_comment(&mut lines, &var.comment, &[]);
        }
    }

    if !file.functions.is_empty() {
        lines.push("### Functions\n".to_string());
        for func in &file.functions {
            render_function(&mut lines, func);
        }
    }

    if !file.tables.is_empty() {
        lines.push("### Tables\n".to_string());
        for entry in &file.tables {
            render_comment(&mut lines, &entry.comment, STRUCTURED);
            if let Some(ref table) = entry.table {
                render_table(&mut lines, table);
            }
        }
    }

    lines.join("\n")
}

fn render_function(lines: &mut Vec<String>, func: &Function) {
    lines.push(format!("#### {}\n", signature(func)));
    render_comment(lines, &func.comment, STRUCTURED);

    let params: Vec<&Annotation> = func.comment.annotations_named("param").collect();
    if !func.arguments.is_empty() || !params.is_empty() {
        lines.push("| Argument | Type | Description |".to_string());
        lines.push("|---|---|---|".to_string());
        for arg in &func.arguments {
            let desc = params
                .iter()
                .find(|p| p.key.as_deref() == Some(arg.name.as_str()))
                .map_or("", |p| p.value.as_str());
            lines.push(format!(
                "| {} | {} | {} |",
                escape_cell(&arg.name),
                escape_cell(arg.datatype.as_deref().unwrap_or("")),
                escape_cell(desc)
            ));
        }
        // @param entries naming no declared argument
        for param in &params {
            let documented = func
                .arguments
                .iter()
                .any(|a| param.key.as_deref() == Some(a.name.as_str()));
            if !documented {
                lines.push(format!(
                    "| {} |  | {} |",
                    escape_cell(param.key.as_deref().unwrap_or("")),
                    escape_cell(&param.value)
                ));
            }
        }
        lines.push(String::new());
    }

    if let Some(ref table) = func.table {
        render_table(lines, table);
    }
}

/// `add(a: Number, b)`; anonymous functions render as `fun(...)`.
fn signature(func: &Function) -> String {
    let args = func
        .arguments
        .iter()
        .map(|a| match a.datatype {
            Some(ref t) => format!("{}: {}", a.name, t),
            None => a.name.clone(),
        })
        .collect::<Vec<_>>()
        .join(", ");
    let name = if func.name.is_empty() { "fun" } else { func.name.as_str() };
    format!("{}({})", name, args)
}

/// Description paragraph followed by the annotations not named in `hidden`.
fn render_comment(lines: &mut Vec<String>, comment: &Comment, hidden: &[&str]) {
    if !comment.text.is_empty() {
        lines.push(comment.text.clone());
        lines.push(String::new());
    }

    let other: Vec<&Annotation> = comment
        .annotations
        .iter()
        .filter(|a| !hidden.iter().any(|s| a.is(s)))
        .collect();
    if !other.is_empty() {
        for ann in other {
            // Indent additional lines for markdown list
            let value = ann.value.replace('\n', "\n  ");
            lines.push(format!("* **@{}** {}", ann.name, value).trim_end().to_string());
        }
        lines.push(String::new());
    }
}

/// Render an annotation table. Short rows are padded, long rows kept whole.
fn render_table(lines: &mut Vec<String>, table: &AnnotationTable) {
    let width = table.columns.len();
    lines.push(format!("| {} |", join_cells(table.columns.iter().map(String::as_str))));
    lines.push(format!("|{}", "---|".repeat(width.max(1))));
    for row in &table.rows {
        let padding = width.saturating_sub(row.fields.len());
        let cells = row
            .fields
            .iter()
            .map(String::as_str)
            .chain(std::iter::repeat("").take(padding));
        lines.push(format!("| {} |", join_cells(cells)));
    }
    lines.push(String::new());
}

fn join_cells<'a>(cells: impl Iterator<Item = &'a str>) -> String {
    cells.map(escape_cell).collect::<Vec<_>>().join(" | ")
}

fn escape_cell(text: &str) -> String {
    text.trim().replace('|', "\\|").replace('\n', " ")
}
