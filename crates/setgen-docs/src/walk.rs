//! # Documentation Walk
//!
//! Both renderers share this traversal. It decides what is documented and
//! in which order; a [`DocStyle`] decides how each piece is spelled.
//!
//! - Internal fields and Comment entries are skipped.
//! - Struct fields become a named block, Array fields a named block holding
//!   one bracketed example element, Compact fields a single line with the
//!   children's defaults joined by spaces.
//! - Every occurrence of a nested shape is documented in full.
//! - Consecutive siblings sharing the Expert flag form a group; the style
//!   is told about each group boundary and about a group still open at the
//!   end of a struct.

use tracing::debug;

use setgen_core::{wrap, CompileError, DefaultValue, Field, Piece, TypeKind};

use crate::inline::{tokenize, Inline};

/// Spaces added per nesting level.
pub const INDENT: &str = "  ";

/// Per-renderer spelling of documentation elements.
pub trait DocStyle {
    /// Columns taken by the comment marker before the text.
    fn comment_marker_width(&self) -> usize;

    /// Convert one inline token into an unsplittable piece.
    fn piece(&self, token: &Inline) -> Piece;

    /// Emit the wrapped comment lines for the field at `path`.
    fn comment(&mut self, out: &mut String, indent: &str, path: &str, lines: &[String]);

    /// Emit `name = value`.
    fn value(&mut self, out: &mut String, indent: &str, name: &str, value: &str);

    /// Open a block, named or (for array elements) bare.
    fn open_block(&mut self, out: &mut String, indent: &str, name: Option<&str>);

    fn close_block(&mut self, out: &mut String, indent: &str);

    /// The Expert flag changed between siblings, or an expert group is
    /// still open at the end of a struct (`to == false`).
    fn expert_boundary(&mut self, _out: &mut String, _to: bool) {}
}

/// Walk `root`'s fields, emitting through `style`.
///
/// # Errors
///
/// `DanglingStruct` for a composite without children, `DefaultMismatch`
/// for a default that can't be shown for its tag.
pub fn walk<S: DocStyle>(style: &mut S, root: &Field, width: usize) -> Result<String, CompileError> {
    let mut out = String::new();
    walk_fields(style, &mut out, root.fields()?, "", 0, width)?;
    debug!(root = %root.name, width, bytes = out.len(), "rendered documentation");
    Ok(out)
}

fn walk_fields<S: DocStyle>(
    style: &mut S,
    out: &mut String,
    fields: &[Field],
    prefix: &str,
    depth: usize,
    width: usize,
) -> Result<(), CompileError> {
    let indent = INDENT.repeat(depth);
    let mut expert = false;

    for field in fields.iter().filter(|f| !f.internal && !f.is_comment()) {
        if field.expert != expert {
            style.expert_boundary(out, field.expert);
            expert = field.expert;
        }

        let path = if prefix.is_empty() {
            field.name.clone()
        } else {
            format!("{prefix}.{}", field.name)
        };

        let text = field.doc_text();
        let pieces: Vec<Piece> = tokenize(&text).iter().map(|t| style.piece(t)).collect();
        if !pieces.is_empty() {
            let avail = width.saturating_sub(indent.len() + style.comment_marker_width());
            style.comment(out, &indent, &path, &wrap(&pieces, avail));
        }

        match field.kind() {
            TypeKind::Struct => {
                style.open_block(out, &indent, Some(&field.name));
                walk_fields(style, out, field.fields()?, &path, depth + 1, width)?;
                style.close_block(out, &indent);
            }
            TypeKind::Array => {
                let inner = format!("{indent}{INDENT}");
                style.open_block(out, &indent, Some(&field.name));
                style.open_block(out, &inner, None);
                walk_fields(style, out, field.fields()?, &path, depth + 2, width)?;
                style.close_block(out, &inner);
                style.close_block(out, &indent);
            }
            TypeKind::Compact => {
                let value = compact_value(field)?;
                style.value(out, &indent, &field.name, &value);
            }
            TypeKind::Comment => {}
            TypeKind::Bool
            | TypeKind::Int
            | TypeKind::Float
            | TypeKind::String
            | TypeKind::Color
            | TypeKind::IntArray
            | TypeKind::FloatArray
            | TypeKind::StringArray
            | TypeKind::ColorArray => {
                let value = default_text(field)?;
                style.value(out, &indent, &field.name, &value);
            }
        }
    }

    if expert {
        style.expert_boundary(out, false);
    }
    Ok(())
}

/// A leaf default as documentation shows it; empty when unset.
pub fn default_text(field: &Field) -> Result<String, CompileError> {
    match &field.default {
        DefaultValue::Null => Ok(String::new()),
        DefaultValue::Bool(b) => Ok(b.to_string()),
        DefaultValue::Int(n) => Ok(n.to_string()),
        DefaultValue::Text(s) => Ok(s.clone()),
        DefaultValue::Fields(_) => Err(CompileError::DefaultMismatch {
            field: field.name.clone(),
            kind: field.kind(),
        }),
    }
}

/// Compact defaults flattened onto one line.
fn compact_value(field: &Field) -> Result<String, CompileError> {
    let mut parts = Vec::new();
    for child in field.fields()?.iter().filter(|f| !f.internal && !f.is_comment()) {
        let text = default_text(child)?;
        if !text.is_empty() {
            parts.push(text);
        }
    }
    Ok(parts.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records the calls made by the walk.
    struct Trace;

    impl DocStyle for Trace {
        fn comment_marker_width(&self) -> usize {
            0
        }
        fn piece(&self, token: &Inline) -> Piece {
            match token {
                Inline::Word(w) => Piece::plain(w.as_str()),
                Inline::Link { label, .. } => Piece::plain(label.as_str()),
            }
        }
        fn comment(&mut self, out: &mut String, indent: &str, path: &str, _lines: &[String]) {
            out.push_str(&format!("{indent}#{path}\n"));
        }
        fn value(&mut self, out: &mut String, indent: &str, name: &str, value: &str) {
            out.push_str(&format!("{indent}{name}={value}\n"));
        }
        fn open_block(&mut self, out: &mut String, indent: &str, name: Option<&str>) {
            out.push_str(&format!("{indent}open {}\n", name.unwrap_or("-")));
        }
        fn close_block(&mut self, out: &mut String, indent: &str) {
            out.push_str(&format!("{indent}close\n"));
        }
        fn expert_boundary(&mut self, out: &mut String, to: bool) {
            out.push_str(if to { "+expert\n" } else { "-expert\n" });
        }
    }

    fn margin() -> Field {
        Field::compact(
            "WindowMargin",
            vec![Field::int("Top", 2, ""), Field::int("Left", 4, "")],
            "",
        )
    }

    #[test]
    fn walks_every_occurrence() {
        let root = Field::structure(
            "GlobalPrefs",
            vec![
                Field::structure("A", vec![margin()], "a"),
                Field::structure("B", vec![margin()], ""),
            ],
            "",
        );
        let out = walk(&mut Trace, &root, 80).unwrap();
        assert_eq!(
            out,
            "#A\nopen A\n  WindowMargin=2 4\nclose\nopen B\n  WindowMargin=2 4\nclose\n"
        );
    }

    #[test]
    fn arrays_hold_one_element_block() {
        let root = Field::structure(
            "GlobalPrefs",
            vec![Field::array("Themes", vec![Field::string("Name", None, "")], "")],
            "",
        );
        let out = walk(&mut Trace, &root, 80).unwrap();
        assert_eq!(out, "open Themes\n  open -\n    Name=\n  close\nclose\n");
    }

    #[test]
    fn skips_internal_and_comment_entries() {
        let root = Field::structure(
            "GlobalPrefs",
            vec![
                Field::comment("header"),
                Field::bool("Hidden", true, "").internal(),
                Field::bool("Shown", true, ""),
            ],
            "",
        );
        assert_eq!(walk(&mut Trace, &root, 80).unwrap(), "Shown=true\n");
    }

    #[test]
    fn expert_groups_open_close_and_force_close() {
        let root = Field::structure(
            "GlobalPrefs",
            vec![
                Field::bool("A", true, ""),
                Field::bool("B", true, "").expert(),
                Field::bool("C", true, "").expert(),
                Field::bool("D", true, ""),
                Field::structure("S", vec![Field::int("E", 1, "").expert()], ""),
            ],
            "",
        );
        let out = walk(&mut Trace, &root, 80).unwrap();
        assert_eq!(
            out,
            "A=true\n+expert\nB=true\nC=true\n-expert\nD=true\nopen S\n+expert\n  E=1\n-expert\nclose\n"
        );
    }

    #[test]
    fn paths_are_dotted() {
        let root = Field::structure(
            "GlobalPrefs",
            vec![Field::structure("Ui", vec![Field::bool("Flag", true, "x")], "")],
            "",
        );
        let out = walk(&mut Trace, &root, 80).unwrap();
        assert!(out.contains("#Ui.Flag"));
    }
}
