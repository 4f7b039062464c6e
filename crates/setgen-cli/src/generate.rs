//! # Gen Subcommand
//!
//! Compiles the schema named by the config into every configured output.
//! All outputs are compiled and spliced in memory first; no file is
//! touched until every output compiled and spliced, so a schema error or a
//! missing marker never leaves a half-updated tree behind. Formatters run
//! only after every file has been written.
//!
//! With `--check` nothing is written: each output is compared with what is
//! on disk and the command exits with 1 if any is stale. An output with a
//! formatter is compared after formatting a scratch copy of it.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{bail, Context, Result};
use clap::Args;
use tracing::{info, warn};

use setgen_codegen::compile_header_unit;
use setgen_docs::{render_html_page, render_text, PageOptions};
use setgen_schema::Schema;

use crate::config::Config;
use crate::splice::splice;

/// Arguments for the `setgen gen` subcommand.
#[derive(Args, Debug, Default)]
pub struct GenArgs {
    /// Verify outputs are up to date instead of writing them.
    #[arg(long)]
    pub check: bool,

    /// Override the version stamped into the documentation.
    #[arg(long, value_name = "VERSION")]
    pub doc_version: Option<String>,

    /// Override the comment wrap width for documentation.
    #[arg(long)]
    pub wrap_width: Option<usize>,

    /// Skip the external formatter even if one is configured.
    #[arg(long)]
    pub no_format: bool,
}

/// One file to produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    pub path: PathBuf,
    pub contents: String,
    /// Formatter run on the file after writing.
    pub formatter: Option<Vec<String>>,
}

/// Execute the gen subcommand.
///
/// Returns exit code: 0 on success, 1 if `--check` finds stale output.
pub fn run_gen(args: &GenArgs, config_path: &Path) -> Result<u8> {
    let mut config = Config::load(config_path)?;
    if let Some(version) = &args.doc_version {
        config.version = version.clone();
    }
    if let Some(width) = args.wrap_width {
        config.wrap_width = width;
    }

    let outputs = plan_outputs(&config)?;
    if outputs.is_empty() {
        warn!("no outputs configured in {}", config_path.display());
    }

    let run_formatters = !args.no_format;
    if args.check {
        return check_outputs(&outputs, run_formatters);
    }

    for output in &outputs {
        write_output(output)?;
    }
    if run_formatters {
        for output in &outputs {
            if let Some(formatter) = &output.formatter {
                run_formatter_on(formatter, &output.path)?;
            }
        }
    }
    Ok(0)
}

/// Compile the schema and produce every configured output in memory.
pub fn plan_outputs(config: &Config) -> Result<Vec<Output>> {
    let mut schema = Schema::load(&config.schema)
        .with_context(|| format!("failed to load schema: {}", config.schema.display()))?;
    schema.stamp_version(&config.version);
    info!(
        schema = %config.schema.display(),
        version = %config.version,
        roots = schema.roots.len(),
        "loaded schema"
    );

    let mut outputs = Vec::new();

    if let Some(header) = &config.header {
        let text = compile_header_unit(&schema.roots)
            .context("failed to compile header")?
            .render(&header.guard);
        outputs.push(Output {
            contents: splice_into(&header.path, &header.marker, &text)?,
            path: header.path.clone(),
            formatter: header.formatter.clone(),
        });
    }

    if let Some(doc) = &config.text_doc {
        let text = render_text(schema.root(), config.wrap_width)
            .context("failed to render text documentation")?;
        outputs.push(Output {
            contents: splice_into(&doc.path, &doc.marker, &text)?,
            path: doc.path.clone(),
            formatter: None,
        });
    }

    if let Some(doc) = &config.html_doc {
        let mut options = PageOptions::new(doc.title.as_str(), config.version.as_str());
        options.width = config.wrap_width;
        let page = render_html_page(schema.root(), &options)
            .context("failed to render HTML documentation")?;
        outputs.push(Output {
            path: doc.path.clone(),
            contents: page,
            formatter: None,
        });
    }

    Ok(outputs)
}

fn splice_into(path: &Path, marker: &str, generated: &str) -> Result<String> {
    let existing = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read splice target: {}", path.display()))?;
    splice(&existing, marker, generated).with_context(|| format!("cannot splice into {}", path.display()))
}

/// Compare outputs with the files on disk, printing one line per output.
///
/// # Errors
///
/// Fails if a formatter cannot be run on the scratch copy of an output.
pub fn check_outputs(outputs: &[Output], run_formatters: bool) -> Result<u8> {
    let mut code = 0;
    for output in outputs {
        let expected = match (&output.formatter, run_formatters) {
            (Some(formatter), true) => formatted_contents(output, formatter)?,
            _ => output.contents.clone(),
        };
        match std::fs::read_to_string(&output.path) {
            Ok(existing) if existing == expected => {
                println!("OK: {} is up to date", output.path.display());
            }
            Ok(_) => {
                println!("FAIL: {} is outdated", output.path.display());
                code = 1;
            }
            Err(_) => {
                println!("FAIL: {} does not exist", output.path.display());
                code = 1;
            }
        }
    }
    Ok(code)
}

/// Run `formatter` on a scratch copy of `output` placed beside the real
/// file, so the formatter picks up the same style configuration.
fn formatted_contents(output: &Output, formatter: &[String]) -> Result<String> {
    let dir = match output.path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let suffix = output
        .path
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();
    let scratch = tempfile::Builder::new()
        .prefix(".setgen-check-")
        .suffix(&suffix)
        .tempfile_in(&dir)
        .with_context(|| format!("failed to create scratch file in {}", dir.display()))?;
    std::fs::write(scratch.path(), &output.contents)
        .with_context(|| format!("failed to write {}", scratch.path().display()))?;
    run_formatter_on(formatter, scratch.path())?;
    std::fs::read_to_string(scratch.path())
        .with_context(|| format!("failed to read {}", scratch.path().display()))
}

fn write_output(output: &Output) -> Result<()> {
    if let Some(parent) = output.path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(&output.path, &output.contents)
        .with_context(|| format!("failed to write {}", output.path.display()))?;
    println!("OK: wrote {}", output.path.display());
    Ok(())
}

fn run_formatter_on(formatter: &[String], path: &Path) -> Result<()> {
    let Some((program, args)) = formatter.split_first() else {
        bail!("formatter command is empty");
    };
    let status = Command::new(program)
        .args(args)
        .arg(path)
        .status()
        .with_context(|| format!("failed to run formatter {program}"))?;
    if !status.success() {
        bail!("formatter {program} failed on {}: {status}", path.display());
    }
    info!(formatter = %program, path = %path.display(), "formatted output");
    Ok(())
}
