//! # setgen-core — Schema Model for the Settings Compiler
//!
//! This crate is the leaf of the setgen workspace. It defines the typed
//! field tree that every backend consumes, the emission registries the
//! backends thread through their recursion, and the greedy word wrapper
//! shared by the code and documentation backends.
//!
//! ## Key Design Principles
//!
//! 1. **Closed tag set.** [`TypeKind`] has one variant per setting type.
//!    Every backend matches on it exhaustively, so adding a tag is a
//!    compile-time obligation in the struct compiler, the metadata
//!    compiler, the default encoder and the documentation walk.
//!
//! 2. **Registries are values.** [`Registry`] carries no global state.
//!    Callers allocate a fresh [`Registries`] pair per compile unit and
//!    pass it down explicitly.
//!
//! 3. **Authoring errors abort.** Every [`CompileError`] names the field
//!    that caused it. There is no partial output.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `setgen-*` crates.
//! - No I/O.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod model;
pub mod naming;
pub mod registry;
pub mod wrap;

pub use error::CompileError;
pub use model::{stamp_version, DefaultValue, Field, Type, TypeKind, BASELINE_VERSION};
pub use naming::{doc_id, lower_camel, singular};
pub use registry::{Registries, Registry};
pub use wrap::{wrap, wrap_words, Piece};
