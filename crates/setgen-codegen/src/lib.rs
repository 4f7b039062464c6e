//! # setgen-codegen — Header Backends
//!
//! Compiles a schema root into the text of a C++ header: struct type
//! definitions followed by reflection metadata guarded by a
//! conditional-inclusion macro.
//!
//! ## Passes
//!
//! - [`structs`] — one struct definition per owning site of a nested
//!   shape, deduplicated by field Name.
//! - [`metadata`] — one `FieldInfo` table and `StructInfo` summary per
//!   *occurrence* of a nested shape, named by StructName with a numeric
//!   suffix after the first.
//! - [`defaults`] — the literal each metadata row stores as its default.
//!
//! The passes produce plain data ([`StructDef`], [`MetadataTable`]) that is
//! rendered to text last, so the IR can be inspected or serialized on its
//! own.
//!
//! ## Registry Discipline
//!
//! [`compile_header`] allocates a fresh [`setgen_core::Registries`] pair.
//! [`compile_header_unit`] threads one pair across several roots that end
//! up in the same file, so exported table names stay unique there.

pub mod cstr;
pub mod defaults;
pub mod header;
pub mod metadata;
pub mod structs;

pub use defaults::{encode_default, DefaultLiteral};
pub use header::{compile_header, compile_header_unit, Header, DEFAULT_GUARD};
pub use metadata::{compile_metadata, MetadataRow, MetadataTable, RowOffset, TableName};
pub use structs::{compile_structs, Member, StructDef};
