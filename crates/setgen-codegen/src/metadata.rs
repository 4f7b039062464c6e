//! # Metadata Compiler
//!
//! Emits the reflection tables a generic loader walks to parse and
//! serialize a settings struct without per-field code. Every non-internal
//! composite *occurrence* gets its own `FieldInfo` array and `StructInfo`
//! summary, even when it shares a struct type with an earlier occurrence,
//! because each occurrence may carry different defaults.
//!
//! Table names are allocated in pre-order when a composite is entered, so
//! the root always gets the unsuffixed name. Tables are emitted in
//! post-order so a nested table precedes every table referring to it.

use serde::Serialize;
use tracing::debug;

use setgen_core::{CompileError, Field, Registry, TypeKind};

use crate::cstr;
use crate::defaults::{encode_default, DefaultLiteral};

/// Name of one emitted table: `g<Base>` for the first occurrence of a
/// StructName, `g<Base>_<n>_` for later ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableName {
    pub base: String,
    pub occurrence: usize,
}

impl TableName {
    /// Allocate the next name for `struct_name`.
    pub fn allocate(struct_name: &str, registry: &mut Registry) -> Self {
        Self {
            base: struct_name.to_string(),
            occurrence: registry.bump(struct_name),
        }
    }

    fn stem(&self) -> String {
        if self.occurrence == 0 {
            format!("g{}", self.base)
        } else {
            format!("g{}_{}_", self.base, self.occurrence)
        }
    }

    /// Identifier of the `FieldInfo` array.
    pub fn fields_ident(&self) -> String {
        format!("{}Fields", self.stem())
    }

    /// Identifier of the `StructInfo` summary.
    pub fn info_ident(&self) -> String {
        format!("{}Info", self.stem())
    }
}

/// Where a row's value lives in the struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum RowOffset {
    /// A member, with its position among the struct's members.
    Member { ident: String, index: usize },
    /// Comment rows have no storage.
    NoStorage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataRow {
    pub offset: RowOffset,
    pub kind: TypeKind,
    pub default: DefaultLiteral,
    /// Serialized key; empty for comments.
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataTable {
    pub name: TableName,
    /// C++ type the offsets are taken in.
    pub struct_name: String,
    pub rows: Vec<MetadataRow>,
}

impl MetadataTable {
    /// Append the `FieldInfo` array and `StructInfo` summary to `out`.
    pub fn render(&self, out: &mut String) {
        out.push_str(&format!(
            "static const FieldInfo {}[] = {{\n",
            self.name.fields_ident()
        ));
        for row in &self.rows {
            let offset = match &row.offset {
                RowOffset::Member { ident, .. } => format!("offsetof({}, {})", self.struct_name, ident),
                RowOffset::NoStorage => "(size_t)-1".to_string(),
            };
            out.push_str(&format!(
                "    {{{}, SettingType::{}, {}}},\n",
                offset,
                row.kind.as_str(),
                row.default
            ));
        }
        out.push_str("};\n");
        out.push_str(&format!(
            "static const StructInfo {} = {{sizeof({}), {}, {}, {}}};\n",
            self.name.info_ident(),
            self.struct_name,
            self.rows.len(),
            self.name.fields_ident(),
            cstr::quote_joined(self.rows.iter().map(|r| r.name.as_str()))
        ));
    }
}

/// Compile the metadata tables reachable from `root`, nested tables first.
///
/// # Errors
///
/// `RootNotStruct`, `DefaultMismatch`, or `DanglingStruct`.
pub fn compile_metadata(root: &Field, registry: &mut Registry) -> Result<Vec<MetadataTable>, CompileError> {
    if root.kind() != TypeKind::Struct {
        return Err(CompileError::RootNotStruct {
            field: root.name.clone(),
        });
    }
    let mut out = Vec::new();
    build_table(root, registry, &mut out)?;
    Ok(out)
}

fn build_table(
    field: &Field,
    registry: &mut Registry,
    out: &mut Vec<MetadataTable>,
) -> Result<TableName, CompileError> {
    let name = TableName::allocate(&field.struct_name, registry);
    debug!(table = %name.info_ident(), site = %field.name, "allocated metadata table");

    let mut rows = Vec::new();
    // member positions mirror the struct compiler, which also counts
    // internal fields and the parsed side-member of colors
    let mut index = 0;
    for child in field.fields()? {
        let kind = child.kind();
        if kind == TypeKind::Comment {
            rows.push(MetadataRow {
                offset: RowOffset::NoStorage,
                kind,
                default: encode_default(child, None)?,
                name: String::new(),
            });
            continue;
        }

        let position = index;
        index += if kind == TypeKind::Color { 2 } else { 1 };
        if child.internal {
            continue;
        }

        let default = if kind.is_composite() {
            let nested = build_table(child, registry, out)?;
            encode_default(child, Some(&nested.info_ident()))?
        } else {
            encode_default(child, None)?
        };
        rows.push(MetadataRow {
            offset: RowOffset::Member {
                ident: child.ident.clone(),
                index: position,
            },
            kind,
            default,
            name: child.name.clone(),
        });
    }

    out.push(MetadataTable {
        name: name.clone(),
        struct_name: field.struct_name.clone(),
        rows,
    });
    Ok(name)
}
