//! knit — generate documentation from annotated DataWeave source files.
//!
//! - **config mode**: `knit` reads `knit.toml` (if any) and documents
//!   `src/main/resources/dwl`
//! - **explicit mode**: `knit -o docs/api.md lib/*.dwl -d src/dwl`

use anyhow::{bail, Context, Result};
use clap::Parser;
use knit::config::KnitConfig;
use knit::discover;
use knit::render::{self, Renderer};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "knit",
    version,
    about = "Generate documentation from annotated DataWeave source files"
)]
struct Cli {
    /// Input files (glob patterns supported), relative to --root
    files: Vec<String>,

    /// Directory to scan recursively (repeatable). Replaces the configured list.
    #[arg(short = 'd', long = "dir")]
    directories: Vec<String>,

    /// Output file, relative to --root
    #[arg(short = 'o', long)]
    output: Option<String>,

    /// Text written verbatim at the top of the document
    #[arg(long)]
    header: Option<String>,

    /// Text written verbatim at the bottom of the document
    #[arg(long)]
    footer: Option<String>,

    /// Write a module navigation table at the top
    #[arg(long)]
    header_table: bool,

    /// Module to list first (repeatable, in order), e.g. -m strings::util
    #[arg(short = 'm', long = "module")]
    modules: Vec<String>,

    /// DataWeave file extension used when scanning directories
    #[arg(long)]
    ext: Option<String>,

    /// Output format: markdown (default), json
    #[arg(short = 'f', long)]
    format: Option<String>,

    /// Skip documentation generation
    #[arg(long)]
    skip: bool,

    /// Print program information first
    #[arg(long)]
    about: bool,

    /// Working directory that inputs, output and knit.toml are resolved against
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Configuration file (default: <root>/knit.toml when present)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Verbose logging (overridden by RUST_LOG)
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = KnitConfig::resolve(&cli.root, cli.config.as_deref())?;
    apply_cli(&mut config, &cli);

    if config.show_about {
        print_about();
    }

    println!("Running Knit doc generator ...");

    if config.skip {
        println!("Info: knit skipping doc generation. (skip=true)");
        return Ok(());
    }

    if config.files.is_empty() && config.directories.is_empty() {
        bail!("no input files or directories specified");
    }

    let renderer = render::create_renderer(&config.format)?;
    let doc = generate(&cli.root, &config, renderer.as_ref())?;

    let output_file = config.output_path(renderer.file_extension());
    let out_path = cli.root.join(&output_file);
    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory: {}", parent.display()))?;
    }
    fs::write(&out_path, doc)
        .with_context(|| format!("failed to write {}", out_path.display()))?;

    println!("Document has been written to '{}'.", output_file);
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Command-line values take precedence over the configuration file.
fn apply_cli(config: &mut KnitConfig, cli: &Cli) {
    if !cli.files.is_empty() {
        config.files = cli.files.clone();
    }
    if !cli.directories.is_empty() {
        config.directories = cli.directories.clone();
    }
    if let Some(ref output) = cli.output {
        config.output_file = Some(output.clone());
    }
    if let Some(ref header) = cli.header {
        config.output_header_text = header.clone();
    }
    if let Some(ref footer) = cli.footer {
        config.output_footer_text = footer.clone();
    }
    if !cli.modules.is_empty() {
        config.module_list = cli.modules.clone();
    }
    if let Some(ref ext) = cli.ext {
        config.file_ext = ext.trim_start_matches('.').to_string();
    }
    if let Some(ref format) = cli.format {
        config.format = format.clone();
    }
    config.write_header_table |= cli.header_table;
    config.skip |= cli.skip;
    config.show_about |= cli.about;
}

/// Discover, read, parse and render every input into one document.
fn generate(root: &Path, config: &KnitConfig, renderer: &dyn Renderer) -> Result<String> {
    // Directories first, then explicit files
    let mut inputs = Vec::new();
    for dir in &config.directories {
        inputs.extend(discover::walk_directory(&root.join(dir), &config.file_ext));
    }
    inputs.extend(discover::expand_files(&config.files, root)?);
    tracing::debug!(count = inputs.len(), "discovered inputs");

    let sources = discover::load(&inputs)?;
    let files = discover::parse_all(&sources, &config.file_ext);

    renderer.render(&files, &config.render_options())
}

fn print_about() {
    println!("Knit {} - DataWeave Document Generator", env!("CARGO_PKG_VERSION"));
    println!("Generates Markdown documentation from /** */ comments in .dwl files.");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_overrides_config() {
        let cli = Cli::parse_from(["knit", "-d", "dwl", "--ext", ".dw", "--header-table", "-m", "b"]);
        let mut config = KnitConfig::default();
        apply_cli(&mut config, &cli);
        assert_eq!(config.directories, vec!["dwl"]);
        assert_eq!(config.file_ext, "dw");
        assert!(config.write_header_table);
        assert_eq!(config.module_list, vec!["b"]);
        assert_eq!(config.output_file, None);
    }

    #[test]
    fn cli_keeps_config_lists_when_absent() {
        let cli = Cli::parse_from(["knit"]);
        let mut config = KnitConfig {
            files: vec!["a.dwl".to_string()],
            ..Default::default()
        };
        apply_cli(&mut config, &cli);
        assert_eq!(config.files, vec!["a.dwl"]);
        assert!(!config.skip);
    }

    #[test]
    fn cli_output_is_explicit() {
        let cli = Cli::parse_from(["knit", "-f", "json", "-o", "docs/api.md"]);
        let mut config = KnitConfig::default();
        apply_cli(&mut config, &cli);
        assert_eq!(config.output_path("json"), "docs/api.md");
    }
}
