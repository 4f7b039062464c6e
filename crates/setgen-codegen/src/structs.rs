//! # Struct Compiler
//!
//! Emits the C++ struct definitions for a schema root. Nested structs are
//! emitted before the struct that contains them, and the root comes last.
//!
//! ## Ownership Rule
//!
//! A nested struct is defined at the first site whose Name equals its
//! StructName or StructName + "s". The registry is keyed by that Name:
//! reusing a Name reuses the type, choosing a different Name forks a new
//! definition even for an identical shape. Sites whose Name matches
//! neither (`WindowPos` of type `Rect`) refer to a type defined elsewhere.
//! This is a naming convention, not structural equality; the metadata
//! table naming relies on the same convention.

use serde::Serialize;
use tracing::debug;

use setgen_core::{wrap_words, CompileError, Field, Registry, TypeKind};

/// Total column width of generated `//` comments.
pub const COMMENT_WIDTH: usize = 72;

/// One struct member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Member {
    /// Comment above the member; `None` for generated side-members.
    pub comment: Option<String>,
    pub ty: String,
    pub ident: String,
}

impl Member {
    fn from_field(field: &Field) -> Self {
        Self {
            comment: Some(field.comment.clone()),
            ty: field.ty.target.clone(),
            ident: field.ident.clone(),
        }
    }

    fn parsed_color(field: &Field) -> Self {
        Self {
            comment: None,
            ty: "ParsedColor".to_string(),
            ident: format!("{}Parsed", field.ident),
        }
    }
}

/// A struct type definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructDef {
    pub name: String,
    pub comment: String,
    pub members: Vec<Member>,
}

impl StructDef {
    /// Append the C++ definition to `out`.
    pub fn render(&self, out: &mut String) {
        if !self.comment.is_empty() {
            push_comment(out, &self.comment, "");
        }
        out.push_str(&format!("struct {} {{\n", self.name));
        for member in &self.members {
            if let Some(comment) = &member.comment {
                push_comment(out, comment, "    ");
            }
            out.push_str(&format!("    {} {};\n", member.ty, member.ident));
        }
        out.push_str("};\n");
    }
}

fn push_comment(out: &mut String, text: &str, indent: &str) {
    let width = COMMENT_WIDTH.saturating_sub(indent.len() + 3);
    let lines = wrap_words(text, width);
    if lines.is_empty() {
        out.push_str(&format!("{indent}//\n"));
    }
    for line in lines {
        out.push_str(&format!("{indent}// {line}\n"));
    }
}

/// Compile the struct definitions reachable from `root`.
///
/// # Errors
///
/// `RootNotStruct` if `root` isn't a Struct; `DuplicateIdent` or
/// `DanglingStruct` from any struct on the way.
pub fn compile_structs(root: &Field, registry: &mut Registry) -> Result<Vec<StructDef>, CompileError> {
    if root.kind() != TypeKind::Struct {
        return Err(CompileError::RootNotStruct {
            field: root.name.clone(),
        });
    }
    let mut out = Vec::new();
    build_struct(root, registry, &mut out)?;
    Ok(out)
}

fn build_struct(
    field: &Field,
    registry: &mut Registry,
    out: &mut Vec<StructDef>,
) -> Result<(), CompileError> {
    field.check_identifiers()?;

    let mut members = Vec::new();
    for child in field.fields()? {
        match child.kind() {
            TypeKind::Comment => {}
            TypeKind::Color => {
                members.push(Member::from_field(child));
                members.push(Member::parsed_color(child));
            }
            TypeKind::Struct | TypeKind::Compact | TypeKind::Array => {
                if child.owns_struct() && !registry.contains(&child.name) {
                    registry.bump(&child.name);
                    debug!(
                        struct_name = %child.struct_name,
                        site = %child.name,
                        "emitting nested struct"
                    );
                    build_struct(child, registry, out)?;
                } else {
                    // still validate the shape at non-owning sites
                    child.fields()?;
                }
                members.push(Member::from_field(child));
            }
            TypeKind::Bool
            | TypeKind::Int
            | TypeKind::Float
            | TypeKind::String
            | TypeKind::IntArray
            | TypeKind::FloatArray
            | TypeKind::StringArray
            | TypeKind::ColorArray => members.push(Member::from_field(child)),
        }
    }

    out.push(StructDef {
        name: field.struct_name.clone(),
        comment: field.comment.clone(),
        members,
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn margin(name: &str) -> Field {
        Field::compact(
            name,
            vec![
                Field::int("Top", 0, "size of the top margin"),
                Field::int("Right", 0, "size of the right margin"),
                Field::int("Bottom", 0, "size of the bottom margin"),
                Field::int("Left", 0, "size of the left margin"),
            ],
            "margin between window and document",
        )
    }

    #[test]
    fn single_bool_member() {
        let root = Field::structure(
            "GlobalPrefs",
            vec![Field::bool("ShowToolbar", true, "if true, we show the toolbar")],
            "Preferences",
        );
        let defs = compile_structs(&root, &mut Registry::new()).unwrap();
        assert_eq!(defs.len(), 1);
        assert_eq!(
            defs[0].members,
            vec![Member {
                comment: Some("if true, we show the toolbar".into()),
                ty: "bool".into(),
                ident: "showToolbar".into(),
            }]
        );
    }

    #[test]
    fn color_gets_parsed_side_member() {
        let root = Field::structure(
            "Theme",
            vec![Field::color("TextColor", "#000000", "text color")],
            "",
        );
        let defs = compile_structs(&root, &mut Registry::new()).unwrap();
        let idents: Vec<_> = defs[0].members.iter().map(|m| m.ident.as_str()).collect();
        assert_eq!(idents, ["textColor", "textColorParsed"]);
        assert_eq!(defs[0].members[1].ty, "ParsedColor");
        assert_eq!(defs[0].members[1].comment, None);
    }

    #[test]
    fn sibling_named_like_a_side_member_is_rejected() {
        let root = Field::structure(
            "Theme",
            vec![Field::color("Text", "#000000", ""), Field::int("TextParsed", 0, "")],
            "",
        );
        let err = compile_structs(&root, &mut Registry::new()).unwrap_err();
        assert!(matches!(err, CompileError::DuplicateIdent { ref ident, .. } if ident == "textParsed"));
    }

    #[test]
    fn comments_produce_no_member() {
        let root = Field::structure(
            "GlobalPrefs",
            vec![Field::empty_line(), Field::bool("A", true, ""), Field::comment("x")],
            "",
        );
        let defs = compile_structs(&root, &mut Registry::new()).unwrap();
        assert_eq!(defs[0].members.len(), 1);
    }

    #[test]
    fn same_name_reuses_type() {
        let root = Field::structure(
            "GlobalPrefs",
            vec![
                Field::structure("FixedPageUI", vec![margin("WindowMargin")], ""),
                Field::structure("ComicBookUI", vec![margin("WindowMargin")], ""),
            ],
            "",
        );
        let defs = compile_structs(&root, &mut Registry::new()).unwrap();
        let names: Vec<_> = defs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["WindowMargin", "FixedPageUI", "ComicBookUI", "GlobalPrefs"]);
    }

    #[test]
    fn different_owning_names_fork_the_type() {
        let root = Field::structure(
            "GlobalPrefs",
            vec![
                margin("Margin"),
                margin("Margins").struct_name("Margin"),
            ],
            "",
        );
        let mut registry = Registry::new();
        let defs = compile_structs(&root, &mut registry).unwrap();
        let names: Vec<_> = defs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["Margin", "Margin", "GlobalPrefs"]);
        assert!(registry.contains("Margin"));
        assert!(registry.contains("Margins"));
    }

    #[test]
    fn non_owning_site_refers_to_external_type() {
        let rect = vec![
            Field::int("X", 0, ""),
            Field::int("Y", 0, ""),
            Field::int("Dx", 0, ""),
            Field::int("Dy", 0, ""),
        ];
        let root = Field::structure(
            "GlobalPrefs",
            vec![Field::compact("WindowPos", rect, "default position").struct_name("Rect")],
            "",
        );
        let defs = compile_structs(&root, &mut Registry::new()).unwrap();
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].members[0].ty, "Rect");
        assert_eq!(defs[0].members[0].ident, "windowPos");
    }

    #[test]
    fn array_element_struct_is_emitted() {
        let root = Field::structure(
            "FileState",
            vec![Field::array(
                "Favorites",
                vec![
                    Field::string("Name", None, "name of this favorite"),
                    Field::int("PageNo", 0, "number of the bookmarked page"),
                ],
                "Values which are persisted for bookmarks/favorites",
            )],
            "",
        );
        let defs = compile_structs(&root, &mut Registry::new()).unwrap();
        assert_eq!(defs[0].name, "Favorite");
        assert_eq!(defs[1].members[0].ty, "Vec<Favorite*>*");
    }

    #[test]
    fn internal_fields_stay_members() {
        let root = Field::structure(
            "Favorite",
            vec![Field::int("MenuId", 0, "id in the menu").internal()],
            "",
        );
        let defs = compile_structs(&root, &mut Registry::new()).unwrap();
        assert_eq!(defs[0].members[0].ident, "menuId");
    }

    #[test]
    fn root_must_be_struct() {
        let err = compile_structs(&Field::bool("X", true, ""), &mut Registry::new()).unwrap_err();
        assert_eq!(err, CompileError::RootNotStruct { field: "X".into() });
    }

    #[test]
    fn renders_cpp_definition() {
        let root = Field::structure(
            "ChmUI",
            vec![
                Field::bool(
                    "UseFixedPageUI",
                    false,
                    "if true, the UI used for PDF documents will be used for CHM documents as well",
                ),
                Field::int("Hidden", 0, ""),
            ],
            "customization options for CHM UI",
        );
        let defs = compile_structs(&root, &mut Registry::new()).unwrap();
        let mut out = String::new();
        defs[0].render(&mut out);
        assert_eq!(
            out,
            "// customization options for CHM UI\n\
             struct ChmUI {\n\
             \x20   // if true, the UI used for PDF documents will be used for CHM\n\
             \x20   // documents as well\n\
             \x20   bool useFixedPageUI;\n\
             \x20   //\n\
             \x20   int hidden;\n\
             };\n"
        );
    }
}
