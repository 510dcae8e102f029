//! knit — generate documentation from annotated DataWeave (`.dwl`) files.
//!
//! [`parser::parse_source`] turns one file's text into a [`model::SourceFile`];
//! [`discover`] finds and reads inputs; [`render`] turns parsed files into a
//! single Markdown or JSON document.

pub mod config;
pub mod discover;
pub mod model;
pub mod parser;
pub mod render;
pub mod toc;

pub use model::SourceFile;
pub use parser::parse_source;
