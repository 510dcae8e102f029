//! Input discovery and loading.
//!
//! Directories are walked recursively and tolerate being absent; explicitly
//! named files must exist. All reading happens here, before any parsing.

use crate::model::SourceFile;
use crate::parser;
use anyhow::{bail, Context, Result};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// A file to document and the root its identity is relative to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    pub root: PathBuf,
    pub path: PathBuf,
    /// Named by the user rather than found by walking
    pub explicit: bool,
}

/// An input with its text already read.
#[derive(Debug, Clone)]
pub struct LoadedSource {
    pub root: String,
    pub path: String,
    pub text: String,
}

/// Recursively collect `*.<ext>` files under `dir`, sorted by name per level.
///
/// A missing or non-directory `dir` is reported and yields nothing.
pub fn walk_directory(dir: &Path, ext: &str) -> Vec<Input> {
    let mut inputs = Vec::new();
    if !dir.exists() {
        tracing::warn!("provided directory '{}' doesn't exist", dir.display());
        return inputs;
    }
    if !dir.is_dir() {
        tracing::warn!("provided directory '{}' isn't a directory", dir.display());
        return inputs;
    }
    walk(dir, dir, ext, &mut inputs);
    inputs
}

fn walk(root: &Path, dir: &Path, ext: &str, inputs: &mut Vec<Input>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("skipping directory {}: {}", dir.display(), e);
            return;
        }
    };
    let mut paths: Vec<PathBuf> = entries.flatten().map(|e| e.path()).collect();
    paths.sort();

    for path in paths {
        if path.is_file() {
            if path.extension().and_then(|e| e.to_str()) == Some(ext) {
                inputs.push(Input {
                    root: root.to_path_buf(),
                    path,
                    explicit: false,
                });
            }
        } else if path.is_dir() {
            walk(root, &path, ext, inputs);
        }
    }
}

/// Resolve explicitly named files against `base`.
///
/// Literal paths must exist. Patterns containing glob metacharacters are
/// expanded; a pattern matching nothing is only a warning.
pub fn expand_files(patterns: &[String], base: &Path) -> Result<Vec<Input>> {
    let mut inputs = Vec::new();
    for pattern in patterns {
        let path = base.join(pattern);
        if path.is_file() {
            inputs.push(explicit_input(base, path));
            continue;
        }
        if !is_glob(pattern) {
            bail!("file not found: {}", path.display());
        }
        let full = path.to_string_lossy();
        let matches: Vec<PathBuf> = glob::glob(&full)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            tracing::warn!("no files matched: {}", pattern);
        }
        inputs.extend(matches.into_iter().map(|p| explicit_input(base, p)));
    }
    Ok(inputs)
}

fn explicit_input(base: &Path, path: PathBuf) -> Input {
    Input {
        root: base.to_path_buf(),
        path,
        explicit: true,
    }
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

/// Read every input. Failing to read an explicit file is fatal; walked files
/// that cannot be read are skipped with a warning.
pub fn load(inputs: &[Input]) -> Result<Vec<LoadedSource>> {
    let mut sources = Vec::with_capacity(inputs.len());
    for input in inputs {
        let text = match fs::read_to_string(&input.path) {
            Ok(text) => text,
            Err(e) if !input.explicit => {
                tracing::warn!("skipping {}: {}", input.path.display(), e);
                continue;
            }
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read {}", input.path.display()))
            }
        };
        sources.push(LoadedSource {
            root: path_string(&input.root),
            path: path_string(&input.path),
            text,
        });
    }
    Ok(sources)
}

/// Parse every loaded source in parallel, keeping input order.
pub fn parse_all(sources: &[LoadedSource], ext: &str) -> Vec<SourceFile> {
    sources
        .par_iter()
        .map(|s| parser::parse_source(&s.text, &s.root, &s.path, ext))
        .collect()
}

/// Path as a `/`-separated string.
fn path_string(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
