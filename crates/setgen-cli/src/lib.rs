//! # setgen-cli — The `setgen` Command
//!
//! Drives the compiler crates from a `setgen.yaml` config: loads the
//! schema, stamps the version, compiles every backend in memory, then
//! splices the results into existing files after their marker lines.
//!
//! ## Subcommands
//!
//! - `setgen gen` — write every configured output (`--check` to verify).
//! - `setgen inspect` — dump the schema or compiled IR as JSON.
//!
//! ```bash
//! setgen gen
//! setgen gen --check
//! setgen --config tools/setgen.yaml inspect tables --pretty
//! ```
//!
//! The compiler crates never touch the filesystem; all I/O lives here.

pub mod config;
pub mod generate;
pub mod inspect;
pub mod splice;

/// Config file used when `--config` is not given.
pub const DEFAULT_CONFIG: &str = "setgen.yaml";
