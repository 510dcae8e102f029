//! Data model for parsed DataWeave documentation — format-agnostic.

use serde::Serialize;

/// Complete parsed document from a single `.dwl` file.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFile {
    /// Path relative to the root it was discovered under, e.g. `/modules/util.dwl`
    pub path: String,
    /// Declared DataWeave extension (bookkeeping only)
    pub ext: String,
    /// Comment preceding the `%dw` header
    pub comment: Option<Comment>,
    /// `@table`/`@row` annotations of the module comment
    pub table: Option<AnnotationTable>,
    pub variables: Vec<Variable>,
    pub functions: Vec<Function>,
    /// Bare comments found in the script body
    pub tables: Vec<BodyTable>,
}

impl SourceFile {
    /// DataWeave module name: `/modules/util.dwl` → `modules::util`.
    pub fn module_name(&self) -> String {
        let path = self.path.trim_start_matches('/');
        let suffix = format!(".{}", self.ext);
        let stem = if self.ext.is_empty() {
            path
        } else {
            path.strip_suffix(suffix.as_str()).unwrap_or(path)
        };
        stem.replace('/', "::")
    }
}

/// A documentation comment split into description and annotations.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    pub text: String,
    pub annotations: Vec<Annotation>,
}

impl Comment {
    /// Annotations whose name matches `name` case-insensitively, in source order.
    pub fn annotations_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Annotation> {
        self.annotations.iter().filter(move |a| a.is(name))
    }
}

/// A single `@name value` entry.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Annotation {
    pub name: String,
    /// Only set for `@param` entries that carried a key token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub value: String,
}

impl Annotation {
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// One entry of a function's argument list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Argument {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Function {
    /// Empty for anonymous `fun (...)` declarations
    pub name: String,
    pub comment: Comment,
    pub table: Option<AnnotationTable>,
    pub arguments: Vec<Argument>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Variable {
    pub name: String,
    pub comment: Comment,
}

/// A documented comment in the script body, typically a mapping table.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct BodyTable {
    pub comment: Comment,
    pub table: Option<AnnotationTable>,
}

/// Tabular data built from `@table` and `@row` annotations.
///
/// Row arity is never checked against the column count.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotationTable {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub fields: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: &str, ext: &str) -> SourceFile {
        SourceFile {
            path: path.to_string(),
            ext: ext.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn module_name_nested() {
        assert_eq!(file("/modules/util.dwl", "dwl").module_name(), "modules::util");
    }

    #[test]
    fn module_name_custom_ext() {
        assert_eq!(file("main.dw", "dw").module_name(), "main");
    }

    #[test]
    fn module_name_foreign_ext_kept() {
        assert_eq!(file("/notes.txt", "dwl").module_name(), "notes.txt");
    }

    #[test]
    fn annotation_lookup_ignores_case() {
        let comment = Comment {
            text: String::new(),
            annotations: vec![
                Annotation {
                    name: "Table".to_string(),
                    key: None,
                    value: "a".to_string(),
                },
                Annotation {
                    name: "row".to_string(),
                    key: None,
                    value: "1".to_string(),
                },
            ],
        };
        assert_eq!(comment.annotations_named("table").count(), 1);
        assert_eq!(comment.annotations_named("ROW").count(), 1);
    }
}
