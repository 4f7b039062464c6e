//! # setgen-schema — Schema Files
//!
//! Loads settings schemas authored in YAML into the
//! [`setgen_core::Field`] tree the compiler consumes.
//!
//! ## File Layout
//!
//! ```yaml
//! shapes:
//!   WindowMargin:
//!     - { name: Top, type: Int, default: 0, comment: size of the top margin }
//! roots:
//!   - name: GlobalPrefs
//!     type: Struct
//!     fields:
//!       - { name: ShowToolbar, type: Bool, default: true, comment: show the toolbar }
//!       - name: WindowMargin
//!         type: Compact
//!         shape: WindowMargin
//!         defaults: { Top: 2 }
//! ```
//!
//! A composite takes its children either inline (`fields`) or from a named
//! shape (`shape`), optionally overriding individual defaults for that
//! site. Type tags are parsed here, so an unknown tag surfaces as
//! [`setgen_core::CompileError::UnknownType`] naming the field.

pub mod error;
pub mod loader;

pub use error::SchemaLoadError;
pub use loader::{FieldDef, Schema, SchemaFile};
