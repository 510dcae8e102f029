//! Renderer module — trait-based format dispatch.

pub mod json;
pub mod markdown;

use crate::model::SourceFile;
use anyhow::{anyhow, Result};

/// Presentation settings shared by all renderers.
#[derive(Debug, Default, Clone)]
pub struct RenderOptions {
    /// Written verbatim before everything else
    pub header_text: String,
    /// Written verbatim after everything else
    pub footer_text: String,
    /// Emit a module navigation table
    pub header_table: bool,
    /// Modules to present first, in this order
    pub module_list: Vec<String>,
}

/// Trait for rendering parsed files into a single output document.
pub trait Renderer {
    fn render(&self, files: &[SourceFile], opts: &RenderOptions) -> Result<String>;
    fn file_extension(&self) -> &str;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "markdown" | "md" => Ok(Box::new(markdown::MarkdownRenderer)),
        "json" => Ok(Box::new(json::JsonRenderer)),
        _ => Err(anyhow!("unknown format: {}. Use markdown or json", format)),
    }
}

/// Apply the custom module order.
///
/// Files named in `module_list` come first in list order, the rest keep their
/// discovery order.
pub fn order_files<'a>(files: &'a [SourceFile], module_list: &[String]) -> Vec<&'a SourceFile> {
    let names: Vec<String> = files.iter().map(SourceFile::module_name).collect();
    let mut picked = vec![false; files.len()];
    let mut ordered = Vec::with_capacity(files.len());

    for wanted in module_list {
        match names.iter().position(|n| n == wanted) {
            Some(idx) if !picked[idx] => {
                picked[idx] = true;
                ordered.push(&files[idx]);
            }
            Some(_) => {}
            None => tracing::debug!(module = %wanted, "module list entry matches no parsed file"),
        }
    }

    ordered.extend(
        files
            .iter()
            .zip(&picked)
            .filter(|(_, taken)| !**taken)
            .map(|(file, _)| file),
    );
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: &str) -> SourceFile {
        SourceFile {
            path: path.to_string(),
            ext: "dwl".to_string(),
            ..Default::default()
        }
    }

    fn names(files: &[&SourceFile]) -> Vec<String> {
        files.iter().map(|f| f.module_name()).collect()
    }

    #[test]
    fn order_without_list_is_discovery_order() {
        let files = vec![file("/b.dwl"), file("/a.dwl")];
        assert_eq!(names(&order_files(&files, &[])), vec!["b", "a"]);
    }

    #[test]
    fn order_listed_first() {
        let files = vec![file("/a.dwl"), file("/b.dwl"), file("/c.dwl")];
        let list = vec!["c".to_string(), "a".to_string()];
        assert_eq!(names(&order_files(&files, &list)), vec!["c", "a", "b"]);
    }

    #[test]
    fn order_ignores_unknown_and_repeats() {
        let files = vec![file("/a.dwl"), file("/b.dwl")];
        let list = vec!["zzz".to_string(), "b".to_string(), "b".to_string()];
        assert_eq!(names(&order_files(&files, &list)), vec!["b", "a"]);
    }

    #[test]
    fn unknown_format() {
        let err = create_renderer("xml").err().unwrap();
        assert!(err.to_string().contains("unknown format"));
    }

    #[test]
    fn known_formats() {
        assert_eq!(create_renderer("md").unwrap().file_extension(), "md");
        assert_eq!(create_renderer("json").unwrap().file_extension(), "json");
    }
}
