//! Plain-text renderer: the settings file format itself, with `; `
//! comments, suitable for splicing into a text documentation page.

use setgen_core::{CompileError, Field, Piece};

use crate::inline::Inline;
use crate::walk::{walk, DocStyle};

struct Plain;

impl DocStyle for Plain {
    fn comment_marker_width(&self) -> usize {
        2
    }

    fn piece(&self, token: &Inline) -> Piece {
        match token {
            Inline::Word(w) => Piece::plain(w.as_str()),
            Inline::Link {
                prefix,
                label,
                url,
                tail,
            } => Piece::plain(format!("{prefix}{label} ({url}){tail}")),
        }
    }

    fn comment(&mut self, out: &mut String, indent: &str, _path: &str, lines: &[String]) {
        for line in lines {
            out.push_str(&format!("{indent}; {line}\n"));
        }
    }

    fn value(&mut self, out: &mut String, indent: &str, name: &str, value: &str) {
        let line = format!("{indent}{name} = {value}");
        out.push_str(line.trim_end());
        out.push('\n');
    }

    fn open_block(&mut self, out: &mut String, indent: &str, name: Option<&str>) {
        match name {
            Some(name) => out.push_str(&format!("{indent}{name} [\n")),
            None => out.push_str(&format!("{indent}[\n")),
        }
    }

    fn close_block(&mut self, out: &mut String, indent: &str) {
        out.push_str(&format!("{indent}]\n"));
    }
}

/// Render the plain-text documentation of `root`, wrapping comments at
/// `width` columns.
pub fn render_text(root: &Field, width: usize) -> Result<String, CompileError> {
    walk(&mut Plain, root, width)
}
