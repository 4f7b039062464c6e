//! # Schema Loading
//!
//! Deserializes the YAML layout into [`FieldDef`]s and resolves them into
//! [`Field`]s: tags are parsed, shapes are expanded in place (each site
//! gets its own copy, so per-site default overrides never leak), and
//! defaults are checked against their tag.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use serde_yaml::Value;

use setgen_core::{stamp_version, CompileError, DefaultValue, Field, TypeKind};

use crate::error::SchemaLoadError;

/// Top-level layout of a schema file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaFile {
    /// Named field lists reusable by composites via `shape:`.
    #[serde(default)]
    pub shapes: BTreeMap<String, Vec<FieldDef>>,
    /// Root Struct fields, compiled into one header in order.
    pub roots: Vec<FieldDef>,
}

/// One field as written in YAML.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDef {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub default: Option<Value>,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub internal: bool,
    #[serde(default)]
    pub expert: bool,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub struct_name: Option<String>,
    #[serde(default)]
    pub fields: Option<Vec<FieldDef>>,
    #[serde(default)]
    pub shape: Option<String>,
    #[serde(default)]
    pub defaults: BTreeMap<String, Value>,
}

/// A loaded schema: one or more root Struct fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub roots: Vec<Field>,
}

impl Schema {
    /// Parse and resolve a schema from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SchemaLoadError> {
        let file: SchemaFile = serde_yaml::from_str(yaml)?;
        Self::from_file(&file)
    }

    /// Read, parse and resolve a schema file.
    pub fn load(path: &Path) -> Result<Self, SchemaLoadError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| SchemaLoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Resolve an already-deserialized schema file.
    pub fn from_file(file: &SchemaFile) -> Result<Self, SchemaLoadError> {
        if file.roots.is_empty() {
            return Err(SchemaLoadError::NoRoots);
        }
        let mut resolver = Resolver {
            shapes: &file.shapes,
            stack: Vec::new(),
        };
        let roots = file
            .roots
            .iter()
            .map(|def| resolver.field(def))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { roots })
    }

    /// The primary root.
    pub fn root(&self) -> &Field {
        &self.roots[0]
    }

    /// Stamp the version into every root's help-link comments.
    pub fn stamp_version(&mut self, version: &str) {
        for root in &mut self.roots {
            stamp_version(root, version);
        }
    }
}

struct Resolver<'a> {
    shapes: &'a BTreeMap<String, Vec<FieldDef>>,
    stack: Vec<String>,
}

impl<'a> Resolver<'a> {
    fn field(&mut self, def: &FieldDef) -> Result<Field, SchemaLoadError> {
        let kind: TypeKind = def.kind.parse().map_err(|tag| CompileError::UnknownType {
            field: def.name.clone(),
            tag,
        })?;

        let default = match kind {
            TypeKind::Struct | TypeKind::Compact | TypeKind::Array => {
                if def.default.is_some() {
                    return Err(mismatch(&def.name, kind).into());
                }
                DefaultValue::Fields(self.children(def)?)
            }
            TypeKind::Comment => DefaultValue::Null,
            TypeKind::Bool
            | TypeKind::Int
            | TypeKind::Float
            | TypeKind::String
            | TypeKind::Color
            | TypeKind::IntArray
            | TypeKind::FloatArray
            | TypeKind::StringArray
            | TypeKind::ColorArray => convert_default(&def.name, kind, def.default.as_ref())?,
        };

        let mut field = Field::new(def.name.as_str(), kind, default, def.comment.as_str());
        if let Some(struct_name) = &def.struct_name {
            field = field.struct_name(struct_name.as_str());
        }
        if let Some(doc) = &def.doc {
            field = field.doc(doc.as_str());
        }
        if let Some(version) = &def.version {
            field = field.version(version.as_str());
        }
        if def.internal {
            field = field.internal();
        }
        if def.expert {
            field = field.expert();
        }
        Ok(field)
    }

    fn children(&mut self, def: &FieldDef) -> Result<Vec<Field>, SchemaLoadError> {
        match (&def.fields, &def.shape) {
            (Some(fields), None) => fields.iter().map(|f| self.field(f)).collect(),
            (None, Some(shape)) => self.expand_shape(def, shape),
            (Some(_), Some(_)) => Err(SchemaLoadError::AmbiguousFields {
                field: def.name.clone(),
            }),
            (None, None) => Err(CompileError::DanglingStruct {
                field: def.name.clone(),
                struct_name: def.struct_name.clone().unwrap_or_else(|| def.name.clone()),
            }
            .into()),
        }
    }

    fn expand_shape(&mut self, def: &FieldDef, shape: &str) -> Result<Vec<Field>, SchemaLoadError> {
        let shapes = self.shapes;
        let defs = shapes.get(shape).ok_or_else(|| CompileError::DanglingStruct {
            field: def.name.clone(),
            struct_name: shape.to_string(),
        })?;
        if self.stack.iter().any(|s| s == shape) {
            return Err(SchemaLoadError::CyclicShape {
                shape: shape.to_string(),
            });
        }

        self.stack.push(shape.to_string());
        let fields = defs
            .iter()
            .map(|f| self.field(f))
            .collect::<Result<Vec<_>, _>>();
        self.stack.pop();
        let mut fields = fields?;

        for (member, value) in &def.defaults {
            let target = fields
                .iter_mut()
                .find(|f| &f.name == member)
                .ok_or_else(|| SchemaLoadError::UnknownOverride {
                    field: def.name.clone(),
                    member: member.clone(),
                })?;
            target.default = convert_default(&target.name, target.kind(), Some(value))?;
        }
        Ok(fields)
    }
}

fn mismatch(field: &str, kind: TypeKind) -> CompileError {
    CompileError::DefaultMismatch {
        field: field.to_string(),
        kind,
    }
}

/// Convert a YAML default to the model form expected by `kind`.
fn convert_default(
    field: &str,
    kind: TypeKind,
    value: Option<&Value>,
) -> Result<DefaultValue, CompileError> {
    let value = match value {
        None | Some(Value::Null) => return Ok(DefaultValue::Null),
        Some(value) => value,
    };
    match (kind, value) {
        (TypeKind::Bool, Value::Bool(b)) => Ok(DefaultValue::Bool(*b)),
        (TypeKind::Int, Value::Number(n)) => {
            n.as_i64().map(DefaultValue::Int).ok_or_else(|| mismatch(field, kind))
        }
        (
            TypeKind::Float
            | TypeKind::String
            | TypeKind::Color
            | TypeKind::IntArray
            | TypeKind::FloatArray
            | TypeKind::StringArray
            | TypeKind::ColorArray,
            Value::String(s),
        ) => Ok(DefaultValue::Text(s.clone())),
        (TypeKind::Float | TypeKind::IntArray | TypeKind::FloatArray, Value::Number(n)) => {
            Ok(DefaultValue::Text(n.to_string()))
        }
        _ => Err(mismatch(field, kind)),
    }
}
