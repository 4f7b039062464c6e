use thiserror::Error;

use setgen_core::CompileError;

/// Error while loading a schema file.
#[derive(Error, Debug)]
pub enum SchemaLoadError {
    /// The schema file could not be read.
    #[error("failed to read schema file '{path}': {source}")]
    Io {
        /// Path that was being read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid YAML or doesn't match the schema layout.
    #[error("failed to parse schema YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The schema is malformed in a way the compiler also rejects.
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// A shape includes itself, directly or through other shapes.
    #[error("shape '{shape}' refers to itself")]
    CyclicShape {
        /// The shape that was re-entered.
        shape: String,
    },

    /// A `defaults:` override names a member the shape doesn't have.
    #[error("field '{field}': default override names unknown member '{member}'")]
    UnknownOverride {
        /// Field carrying the override.
        field: String,
        /// The unknown member name.
        member: String,
    },

    /// Both `fields` and `shape` were given.
    #[error("field '{field}': give either 'fields' or 'shape', not both")]
    AmbiguousFields {
        /// The offending field.
        field: String,
    },

    /// The file lists no roots.
    #[error("schema defines no roots")]
    NoRoots,
}
