//! # Error Types — Schema Authoring Defects
//!
//! Every failure the compiler can report is a defect in the authored
//! schema, not a runtime condition. Each variant carries the name of the
//! offending field so the author can find it. Callers must discard any
//! output produced before the error.

use thiserror::Error;

use crate::model::TypeKind;

/// A fatal schema-authoring error raised by any compiler pass.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// A type tag outside the closed tag set.
    #[error("field '{field}': unrecognized type tag '{tag}'")]
    UnknownType {
        /// Name of the field carrying the tag.
        field: String,
        /// The tag as written.
        tag: String,
    },

    /// A composite field whose nested definition cannot be found.
    #[error("field '{field}': no definition for struct '{struct_name}' is reachable from the root")]
    DanglingStruct {
        /// Name of the referencing field.
        field: String,
        /// The struct name it refers to.
        struct_name: String,
    },

    /// Two fields of one struct derive the same member identifier.
    #[error("struct '{struct_name}': fields '{first}' and '{second}' both derive identifier '{ident}'")]
    DuplicateIdent {
        /// Struct containing both fields.
        struct_name: String,
        /// First field in declaration order.
        first: String,
        /// Second field in declaration order.
        second: String,
        /// The colliding identifier.
        ident: String,
    },

    /// A default value whose shape does not fit the field's tag.
    #[error("field '{field}': default value does not fit type {kind}")]
    DefaultMismatch {
        /// Name of the field.
        field: String,
        /// The field's tag.
        kind: TypeKind,
    },

    /// A compile was started on something other than a Struct field.
    #[error("field '{field}': schema root must be a Struct")]
    RootNotStruct {
        /// Name of the would-be root.
        field: String,
    },
}
