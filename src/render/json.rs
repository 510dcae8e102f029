//! JSON renderer — structured output for tooling integration.
//!
//! Serializes the parsed model directly, in presentation order.

use crate::model::SourceFile;
use crate::render::{order_files, RenderOptions, Renderer};
use anyhow::{Context, Result};
use serde::Serialize;

pub struct JsonRenderer;

#[derive(Serialize)]
struct JsonDoc<'a> {
    files: Vec<JsonFile<'a>>,
}

#[derive(Serialize)]
struct JsonFile<'a> {
    module: String,
    #[serde(flatten)]
    file: &'a SourceFile,
}

impl Renderer for JsonRenderer {
    fn render(&self, files: &[SourceFile], opts: &RenderOptions) -> Result<String> {
        let doc = JsonDoc {
            files: order_files(files, &opts.module_list)
                .into_iter()
                .map(|file| JsonFile {
                    module: file.module_name(),
                    file,
                })
                .collect(),
        };
        let mut out = serde_json::to_string_pretty(&doc).context("failed to serialize documentation")?;
        out.push('\n');
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_source;

    #[test]
    fn serializes_model() {
        let text = "/** Mod. */\n%dw 2.0\n/**\n * Adds.\n * @param a left\n */\nfun add(a: Number) = a\n";
        let file = parse_source(text, "", "math.dwl", "dwl");
        let out = JsonRenderer.render(&[file], &RenderOptions::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        let f = &value["files"][0];
        assert_eq!(f["module"], "math");
        assert_eq!(f["path"], "math.dwl");
        assert_eq!(f["comment"]["text"], "Mod.");
        assert_eq!(f["functions"][0]["name"], "add");
        assert_eq!(f["functions"][0]["arguments"][0]["datatype"], "Number");
        assert_eq!(f["functions"][0]["comment"]["annotations"][0]["key"], "a");
        assert!(f["functions"][0]["table"].is_null());
    }

    #[test]
    fn module_table_is_serialized() {
        let text = "/**\n * Codes.\n * @table Code, Name\n * @row A, Alpha\n */\n%dw 2.0\n";
        let file = parse_source(text, "", "codes.dwl", "dwl");
        let out = JsonRenderer.render(&[file], &RenderOptions::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        let table = &value["files"][0]["table"];
        assert_eq!(table["columns"][0], "Code");
        assert_eq!(table["rows"][0]["fields"][1], " Alpha");
    }

    #[test]
    fn untyped_argument_omits_datatype() {
        let file = parse_source("/** x */\nfun f(a) = a", "", "f.dwl", "dwl");
        let out = JsonRenderer.render(&[file], &RenderOptions::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        let arg = &value["files"][0]["functions"][0]["arguments"][0];
        assert_eq!(arg["name"], "a");
        assert!(arg.get("datatype").is_none());
    }
}
