//! `setgen inspect`: dump the loaded schema or compiled IR as JSON.

use std::path::Path;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use setgen_codegen::compile_header_unit;
use setgen_schema::Schema;

use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Stage {
    /// Resolved field tree.
    Schema,
    /// Struct definitions.
    Structs,
    /// Metadata tables.
    Tables,
}

/// Arguments for the `setgen inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// What to dump.
    #[arg(value_enum, default_value = "schema")]
    pub stage: Stage,

    /// Pretty-print the JSON.
    #[arg(long)]
    pub pretty: bool,
}

pub fn run_inspect(args: &InspectArgs, config_path: &Path) -> Result<u8> {
    println!("{}", inspect(args, config_path)?);
    Ok(0)
}

/// Produce the JSON text for `args`.
pub fn inspect(args: &InspectArgs, config_path: &Path) -> Result<String> {
    let config = Config::load(config_path)?;
    let mut schema = Schema::load(&config.schema)
        .with_context(|| format!("failed to load schema: {}", config.schema.display()))?;
    schema.stamp_version(&config.version);

    let value = match args.stage {
        Stage::Schema => serde_json::to_value(&schema.roots)?,
        Stage::Structs | Stage::Tables => {
            let header = compile_header_unit(&schema.roots)?;
            if args.stage == Stage::Structs {
                serde_json::to_value(&header.structs)?
            } else {
                serde_json::to_value(&header.tables)?
            }
        }
    };

    let text = if args.pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    Ok(text)
}
