//! # Default-Literal Encoding
//!
//! Each metadata row stores its default in one pointer-sized slot:
//!
//! | Tag | Literal |
//! |-----|---------|
//! | Bool | `true` / `false` |
//! | Int | decimal |
//! | Float, String, Color, primitive arrays | `(intptr_t)"text"` |
//! | Struct, Compact, Array | `(intptr_t)&g<Table>Info` |
//! | Comment | `(intptr_t)"text"`, or `0` when empty |
//! | no default | `0` |
//!
//! Text defaults stay textual: the loader parses them at load time, and
//! the same text is what documentation shows as the example value.

use std::fmt;

use serde::Serialize;

use setgen_core::{CompileError, DefaultValue, Field, TypeKind};

use crate::cstr;

/// A default as stored in a metadata row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value")]
pub enum DefaultLiteral {
    Bool(bool),
    Int(i64),
    /// Pointer to a string literal.
    Str(String),
    /// Pointer to the named `StructInfo` of a nested table.
    TableRef(String),
    /// Zero / null sentinel.
    Null,
}

impl fmt::Display for DefaultLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultLiteral::Bool(b) => write!(f, "{b}"),
            DefaultLiteral::Int(n) => write!(f, "{n}"),
            DefaultLiteral::Str(s) => write!(f, "(intptr_t){}", cstr::quote(s)),
            DefaultLiteral::TableRef(info) => write!(f, "(intptr_t)&{info}"),
            DefaultLiteral::Null => f.write_str("0"),
        }
    }
}

/// Encode `field`'s default. `table` is the info identifier of this
/// occurrence's nested table and is required for composites.
///
/// # Errors
///
/// `DefaultMismatch` when the default contradicts the tag;
/// `DanglingStruct` for a composite without children or table.
pub fn encode_default(field: &Field, table: Option<&str>) -> Result<DefaultLiteral, CompileError> {
    let kind = field.kind();
    match kind {
        TypeKind::Bool => match &field.default {
            DefaultValue::Bool(b) => Ok(DefaultLiteral::Bool(*b)),
            DefaultValue::Null => Ok(DefaultLiteral::Null),
            _ => Err(mismatch(field)),
        },
        TypeKind::Int => match &field.default {
            DefaultValue::Int(n) => Ok(DefaultLiteral::Int(*n)),
            DefaultValue::Null => Ok(DefaultLiteral::Null),
            _ => Err(mismatch(field)),
        },
        TypeKind::Float
        | TypeKind::String
        | TypeKind::Color
        | TypeKind::IntArray
        | TypeKind::FloatArray
        | TypeKind::StringArray
        | TypeKind::ColorArray => match &field.default {
            DefaultValue::Text(s) => Ok(DefaultLiteral::Str(s.clone())),
            DefaultValue::Null => Ok(DefaultLiteral::Null),
            _ => Err(mismatch(field)),
        },
        TypeKind::Struct | TypeKind::Compact | TypeKind::Array => {
            field.fields()?;
            match table {
                Some(info) => Ok(DefaultLiteral::TableRef(info.to_string())),
                None => Err(CompileError::DanglingStruct {
                    field: field.name.clone(),
                    struct_name: field.struct_name.clone(),
                }),
            }
        }
        TypeKind::Comment => {
            if field.comment.is_empty() {
                Ok(DefaultLiteral::Null)
            } else {
                Ok(DefaultLiteral::Str(field.comment.clone()))
            }
        }
    }
}

fn mismatch(field: &Field) -> CompileError {
    CompileError::DefaultMismatch {
        field: field.name.clone(),
        kind: field.kind(),
    }
}
