//! # Schema Model — Typed Field Tree
//!
//! A schema is a tree of [`Field`]s rooted in one Struct field. Leaves
//! carry primitive defaults; composites (Struct, Compact, Array) carry
//! their child fields as their default. Comment entries are fields too:
//! they occupy a slot in the persisted file and in the metadata table but
//! produce no struct member.
//!
//! Construction goes through the per-tag constructors on [`Field`] and the
//! chaining flag helpers (`expert`, `internal`, `version`, `doc`,
//! `struct_name`). There is no validation here beyond what the
//! constructors guarantee; the compiler passes report authoring errors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CompileError;
use crate::naming::{doc_id, lower_camel, singular};

/// Version assumed for fields that don't declare one. Fields introduced
/// later carry their own version, which documentation calls out.
pub const BASELINE_VERSION: &str = "2.3";

/// The closed set of setting type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeKind {
    /// `bool`
    Bool,
    /// `int`
    Int,
    /// `float`, stored and defaulted as text.
    Float,
    /// `char*`
    String,
    /// `char*` plus a parsed side member.
    Color,
    /// Nested struct rendered as a bracketed block in documentation.
    Struct,
    /// Nested struct rendered on a single line in documentation.
    Compact,
    /// `Vec<Elem*>*` of nested structs.
    Array,
    /// Comment line in the persisted file; no storage.
    Comment,
    /// `Vec<int>*`
    IntArray,
    /// `Vec<float>*`
    FloatArray,
    /// `Vec<char*>*`
    StringArray,
    /// `Vec<char*>*` of color strings.
    ColorArray,
}

impl TypeKind {
    /// Every tag, in declaration order.
    pub const ALL: [TypeKind; 13] = [
        TypeKind::Bool,
        TypeKind::Int,
        TypeKind::Float,
        TypeKind::String,
        TypeKind::Color,
        TypeKind::Struct,
        TypeKind::Compact,
        TypeKind::Array,
        TypeKind::Comment,
        TypeKind::IntArray,
        TypeKind::FloatArray,
        TypeKind::StringArray,
        TypeKind::ColorArray,
    ];

    /// The tag's spelling, as used in schema files and in `SettingType::`.
    pub fn as_str(self) -> &'static str {
        match self {
            TypeKind::Bool => "Bool",
            TypeKind::Int => "Int",
            TypeKind::Float => "Float",
            TypeKind::String => "String",
            TypeKind::Color => "Color",
            TypeKind::Struct => "Struct",
            TypeKind::Compact => "Compact",
            TypeKind::Array => "Array",
            TypeKind::Comment => "Comment",
            TypeKind::IntArray => "IntArray",
            TypeKind::FloatArray => "FloatArray",
            TypeKind::StringArray => "StringArray",
            TypeKind::ColorArray => "ColorArray",
        }
    }

    /// Struct, Compact and Array hold child fields.
    pub fn is_composite(self) -> bool {
        matches!(self, TypeKind::Struct | TypeKind::Compact | TypeKind::Array)
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeKind {
    /// The unrecognized tag.
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TypeKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// A type tag with the target-language spelling of the member type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Type {
    /// The tag.
    pub kind: TypeKind,
    /// Member type as written in the generated struct.
    pub target: String,
}

impl Type {
    /// Build the type for `kind`; `struct_name` is only consulted for
    /// composites.
    pub fn new(kind: TypeKind, struct_name: &str) -> Self {
        let target = match kind {
            TypeKind::Bool => "bool".to_string(),
            TypeKind::Int => "int".to_string(),
            TypeKind::Float => "float".to_string(),
            TypeKind::String | TypeKind::Color => "char*".to_string(),
            TypeKind::Struct | TypeKind::Compact => struct_name.to_string(),
            TypeKind::Array => format!("Vec<{struct_name}*>*"),
            TypeKind::Comment => String::new(),
            TypeKind::IntArray => "Vec<int>*".to_string(),
            TypeKind::FloatArray => "Vec<float>*".to_string(),
            TypeKind::StringArray | TypeKind::ColorArray => "Vec<char*>*".to_string(),
        };
        Self { kind, target }
    }
}

/// A field's default: a primitive literal, the child list of a
/// composite, or nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DefaultValue {
    /// No default; encodes as the zero sentinel.
    Null,
    /// Bool literal.
    Bool(bool),
    /// Int literal.
    Int(i64),
    /// Human-readable text for Float, String, Color and primitive arrays.
    Text(String),
    /// Child fields of a Struct, Compact or Array.
    Fields(Vec<Field>),
}

/// One node of the schema tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    /// Name as written in the settings file.
    pub name: String,
    /// Type tag and target spelling.
    pub ty: Type,
    /// Default value or child list.
    pub default: DefaultValue,
    /// Short description; for Comment entries, the comment text.
    pub comment: String,
    /// Long-form description used by documentation.
    pub doc_comment: String,
    /// Struct member only: no metadata row, not documented.
    pub internal: bool,
    /// Intended for hand-editing only.
    pub expert: bool,
    /// Version the field was introduced in.
    pub version: String,
    /// Emitted name of the nested struct (composites only).
    pub struct_name: String,
    /// Derived struct member identifier.
    pub ident: String,
}

impl Field {
    /// Generic constructor. Composites get a struct name derived from
    /// `name` (singularized for arrays).
    pub fn new(
        name: impl Into<String>,
        kind: TypeKind,
        default: DefaultValue,
        comment: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let comment = comment.into();
        let struct_name = match kind {
            TypeKind::Array => singular(&name),
            TypeKind::Struct | TypeKind::Compact => name.clone(),
            _ => String::new(),
        };
        Self {
            ident: lower_camel(&name),
            ty: Type::new(kind, &struct_name),
            default,
            doc_comment: comment.clone(),
            comment,
            internal: false,
            expert: false,
            version: BASELINE_VERSION.to_string(),
            struct_name,
            name,
        }
    }

    pub fn bool(name: impl Into<String>, default: bool, comment: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Bool, DefaultValue::Bool(default), comment)
    }

    pub fn int(name: impl Into<String>, default: i64, comment: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Int, DefaultValue::Int(default), comment)
    }

    /// Float defaults are kept in their textual form.
    pub fn float(name: impl Into<String>, default: &str, comment: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Float, text_default(Some(default)), comment)
    }

    pub fn string(
        name: impl Into<String>,
        default: Option<&str>,
        comment: impl Into<String>,
    ) -> Self {
        Self::new(name, TypeKind::String, text_default(default), comment)
    }

    pub fn color(name: impl Into<String>, default: &str, comment: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Color, text_default(Some(default)), comment)
    }

    pub fn structure(
        name: impl Into<String>,
        fields: Vec<Field>,
        comment: impl Into<String>,
    ) -> Self {
        Self::new(name, TypeKind::Struct, DefaultValue::Fields(fields), comment)
    }

    pub fn compact(name: impl Into<String>, fields: Vec<Field>, comment: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Compact, DefaultValue::Fields(fields), comment)
    }

    /// An array whose element struct is the singular of `name`.
    pub fn array(name: impl Into<String>, fields: Vec<Field>, comment: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Array, DefaultValue::Fields(fields), comment)
    }

    pub fn int_array(
        name: impl Into<String>,
        default: Option<&str>,
        comment: impl Into<String>,
    ) -> Self {
        Self::new(name, TypeKind::IntArray, text_default(default), comment)
    }

    pub fn float_array(
        name: impl Into<String>,
        default: Option<&str>,
        comment: impl Into<String>,
    ) -> Self {
        Self::new(name, TypeKind::FloatArray, text_default(default), comment)
    }

    pub fn string_array(
        name: impl Into<String>,
        default: Option<&str>,
        comment: impl Into<String>,
    ) -> Self {
        Self::new(name, TypeKind::StringArray, text_default(default), comment)
    }

    pub fn color_array(
        name: impl Into<String>,
        default: Option<&str>,
        comment: impl Into<String>,
    ) -> Self {
        Self::new(name, TypeKind::ColorArray, text_default(default), comment)
    }

    /// A comment line in the persisted settings file.
    pub fn comment(text: impl Into<String>) -> Self {
        Self::new("", TypeKind::Comment, DefaultValue::Null, text)
    }

    /// A blank comment line, used to separate groups.
    pub fn empty_line() -> Self {
        Self::comment("")
    }

    /// Mark as hand-edit only.
    #[must_use]
    pub fn expert(mut self) -> Self {
        self.expert = true;
        self
    }

    /// Mark as struct-only: no metadata row, not documented.
    #[must_use]
    pub fn internal(mut self) -> Self {
        self.internal = true;
        self
    }

    /// Set the version the field was introduced in.
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set the long-form documentation comment.
    #[must_use]
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc_comment = doc.into();
        self
    }

    /// Override the emitted name of the nested struct.
    #[must_use]
    pub fn struct_name(mut self, struct_name: impl Into<String>) -> Self {
        self.struct_name = struct_name.into();
        self.ty = Type::new(self.ty.kind, &self.struct_name);
        self
    }

    /// Tag of this field.
    pub fn kind(&self) -> TypeKind {
        self.ty.kind
    }

    pub fn is_comment(&self) -> bool {
        self.ty.kind == TypeKind::Comment
    }

    /// Child fields of a composite.
    ///
    /// # Errors
    ///
    /// `DanglingStruct` when the field is a composite without a child list,
    /// or not a composite at all.
    pub fn fields(&self) -> Result<&[Field], CompileError> {
        match &self.default {
            DefaultValue::Fields(fields) if self.ty.kind.is_composite() => Ok(fields),
            _ => Err(CompileError::DanglingStruct {
                field: self.name.clone(),
                struct_name: self.struct_name.clone(),
            }),
        }
    }

    /// Whether this site owns the nested struct definition: its Name is
    /// the StructName or the StructName's plural.
    pub fn owns_struct(&self) -> bool {
        self.name == self.struct_name
            || self
                .name
                .strip_suffix('s')
                .is_some_and(|stem| stem == self.struct_name)
    }

    /// Documentation text: the doc comment plus a version note for fields
    /// newer than the baseline.
    pub fn doc_text(&self) -> String {
        if self.version == BASELINE_VERSION {
            self.doc_comment.clone()
        } else {
            format!(
                "{} (introduced in version {})",
                self.doc_comment, self.version
            )
        }
    }

    /// Identifiers this field contributes to its struct: its own, plus the
    /// `Parsed` side member of a Color. Comments contribute none.
    pub fn member_idents(&self) -> Vec<String> {
        match self.kind() {
            TypeKind::Comment => Vec::new(),
            TypeKind::Color => vec![self.ident.clone(), format!("{}Parsed", self.ident)],
            _ => vec![self.ident.clone()],
        }
    }

    /// Check that no two members of this struct share an identifier,
    /// counting the generated Color side members.
    ///
    /// # Errors
    ///
    /// `DuplicateIdent` naming both fields, or `DanglingStruct` if this is
    /// not a composite.
    pub fn check_identifiers(&self) -> Result<(), CompileError> {
        let mut seen: Vec<(String, &Field)> = Vec::new();
        for field in self.fields()? {
            for ident in field.member_idents() {
                if let Some((_, other)) = seen.iter().find(|(id, _)| *id == ident) {
                    return Err(CompileError::DuplicateIdent {
                        struct_name: self.struct_name.clone(),
                        first: other.name.clone(),
                        second: field.name.clone(),
                        ident,
                    });
                }
                seen.push((ident, field));
            }
        }
        Ok(())
    }
}

fn text_default(text: Option<&str>) -> DefaultValue {
    match text {
        Some(text) => DefaultValue::Text(text.to_string()),
        None => DefaultValue::Null,
    }
}

/// Stamp `version` into the root's own Comment entries, replacing
/// `{version}` and `{doc_id}` placeholders. Used for the help-link comment
/// at the top of the settings file.
pub fn stamp_version(root: &mut Field, version: &str) {
    let id = doc_id(version);
    if let DefaultValue::Fields(fields) = &mut root.default {
        for field in fields.iter_mut().filter(|f| f.is_comment()) {
            let stamped = field
                .comment
                .replace("{version}", version)
                .replace("{doc_id}", &id);
            field.doc_comment = stamped.clone();
            field.comment = stamped;
        }
    }
}
