//! md2guide: CLI tool to convert Markdown documentation into an AmigaGuide
//! database.
//!
//! Every input file renders into the node named after its file stem; the
//! whole graph is serialized once and the same bytes go to every output
//! target.

mod config;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

use config::Config;
use md2guide_core::{GuideWriter, render_document};

#[derive(Parser, Debug)]
#[command(name = "md2guide")]
#[command(about = "Convert Markdown documentation into an AmigaGuide database")]
#[command(version)]
#[command(after_help = "Examples:
  md2guide docs/ -o Api.guide       # Convert a directory
  md2guide docs/ -o Api.guide -o /mnt/amiga/Api.guide
                                    # Same bytes, two targets
  md2guide intro.md -o intro.guide  # Convert a single file")]
struct Cli {
    /// Input Markdown file or directory
    input: PathBuf,

    /// Output guide file (repeat to write several copies)
    #[arg(short, long)]
    output: Vec<PathBuf>,

    /// Process directories recursively
    #[arg(short, long)]
    recursive: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only show errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_dir = if cli.input.is_dir() {
        Some(cli.input.as_path())
    } else {
        cli.input.parent().filter(|p| !p.as_os_str().is_empty())
    };
    let config = match config_dir {
        Some(dir) => Config::load_from_dir(dir)?.unwrap_or_default(),
        None => Config::default(),
    };

    let outputs = if cli.output.is_empty() {
        config.output.paths.clone()
    } else {
        cli.output.clone()
    };
    if outputs.is_empty() {
        anyhow::bail!(
            "no output path given: pass -o/--output or set [output] paths in {}",
            config::CONFIG_FILE_NAME
        );
    }

    let files = if cli.input.is_file() {
        vec![cli.input.clone()]
    } else if cli.input.is_dir() {
        collect_md_files(&cli.input, cli.recursive)?
    } else {
        anyhow::bail!("Input path does not exist: {}", cli.input.display());
    };

    if files.is_empty() {
        anyhow::bail!("No .md files found in {}", cli.input.display());
    }

    if cli.verbose {
        eprintln!("Found {} .md files", files.len());
    }

    let mut writer = GuideWriter::new();

    for file in &files {
        let stem = file
            .file_stem()
            .and_then(|stem| stem.to_str())
            .with_context(|| format!("Input file name is not valid UTF-8: {}", file.display()))?;

        if cli.verbose {
            eprintln!("Rendering: {}", file.display());
        }

        let source = fs::read_to_string(file)
            .with_context(|| format!("Failed to read: {}", file.display()))?;
        let root = md2guide_parser::parse(&source);

        let node = writer.node(stem);
        render_document(writer.registry_mut(), node, &root);
    }

    let bytes = writer.save_bytes();

    for path in &outputs {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
        }
        fs::write(path, &bytes).with_context(|| format!("Failed to write: {}", path.display()))?;
        if !cli.quiet {
            println!("{}", path.display());
        }
    }

    if cli.verbose {
        eprintln!(
            "Wrote {} nodes from {} files",
            writer.registry().len(),
            files.len()
        );
    }

    Ok(())
}

/// Collect all .md files in a directory, sorted for a stable node order.
fn collect_md_files(dir: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in
        fs::read_dir(dir).with_context(|| format!("Failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_file() {
            if let Some(ext) = path.extension() {
                if ext.eq_ignore_ascii_case("md") {
                    files.push(path);
                }
            }
        } else if path.is_dir() && recursive {
            files.extend(collect_md_files(&path, recursive)?);
        }
    }

    files.sort();
    Ok(files)
}
