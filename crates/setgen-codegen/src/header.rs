//! Header assembly: struct definitions, then metadata inside a guard.

use serde::Serialize;
use tracing::info;

use setgen_core::{CompileError, Field, Registries};

use crate::metadata::{compile_metadata, MetadataTable};
use crate::structs::{compile_structs, StructDef};

/// Macro guarding the metadata block.
pub const DEFAULT_GUARD: &str = "INCLUDE_SETTINGSSTRUCTS_METADATA";

/// Everything generated for one header file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Header {
    pub structs: Vec<StructDef>,
    pub tables: Vec<MetadataTable>,
}

/// Compile a single root with a fresh registry pair.
///
/// # Errors
///
/// Any [`CompileError`] from the struct or metadata passes.
pub fn compile_header(root: &Field) -> Result<Header, CompileError> {
    compile_header_unit(std::slice::from_ref(root))
}

/// Compile several roots that share one header file. The registries are
/// shared, so a struct owned by an earlier root is not redefined and table
/// names continue numbering.
///
/// # Errors
///
/// Any [`CompileError`] from the struct or metadata passes.
pub fn compile_header_unit(roots: &[Field]) -> Result<Header, CompileError> {
    let mut registries = Registries::new();
    let mut header = Header::default();
    for root in roots {
        header.structs.extend(compile_structs(root, &mut registries.structs)?);
        header.tables.extend(compile_metadata(root, &mut registries.tables)?);
    }
    info!(
        roots = roots.len(),
        structs = header.structs.len(),
        tables = header.tables.len(),
        "compiled header"
    );
    Ok(header)
}

impl Header {
    /// Render the header text with the metadata under `guard`.
    pub fn render(&self, guard: &str) -> String {
        let mut out = String::new();
        for def in &self.structs {
            def.render(&mut out);
            out.push('\n');
        }
        out.push_str(&format!("#ifdef {guard}\n\n"));
        for table in &self.tables {
            table.render(&mut out);
            out.push('\n');
        }
        out.push_str("#endif\n");
        out
    }
}
