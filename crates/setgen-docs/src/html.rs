//! # Structured Renderer
//!
//! Same layout as the plain renderer, as HTML: comments are `<span
//! class=cm>` elements anchored by the field's dotted path, links become
//! `<a>` elements, and expert groups are wrapped in `<div class=expert>`
//! so the page can collapse them.

use setgen_core::{doc_id, CompileError, Field, Piece};

use crate::inline::Inline;
use crate::walk::{walk, DocStyle};

struct Html;

impl DocStyle for Html {
    fn comment_marker_width(&self) -> usize {
        2
    }

    fn piece(&self, token: &Inline) -> Piece {
        match token {
            Inline::Word(w) => Piece::new(escape(w), w.chars().count()),
            Inline::Link {
                prefix,
                label,
                url,
                tail,
            } => Piece::new(
                format!(
                    "{}<a href=\"{}\">{}</a>{}",
                    escape(prefix),
                    escape(url),
                    escape(label),
                    escape(tail)
                ),
                prefix.chars().count() + label.chars().count() + tail.chars().count(),
            ),
        }
    }

    fn comment(&mut self, out: &mut String, indent: &str, path: &str, lines: &[String]) {
        out.push_str(&format!("{indent}<span class=cm id=\"{}\">", escape(path)));
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                out.push('\n');
                out.push_str(indent);
            }
            out.push_str("; ");
            out.push_str(line);
        }
        out.push_str("</span>\n");
    }

    fn value(&mut self, out: &mut String, indent: &str, name: &str, value: &str) {
        let line = format!("{indent}{name} = {}", escape(value));
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

    fn expert_boundary(&mut self, out: &mut String, to: bool) {
        out.push_str(if to { "<div class=expert>\n" } else { "</div>\n" });
    }
}

/// Escape text for HTML element content and attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}

/// Render the HTML fragment (the body of the `<pre>` block).
pub fn render_html(root: &Field, width: usize) -> Result<String, CompileError> {
    walk(&mut Html, root, width)
}

/// Options for a standalone documentation page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOptions {
    /// Page heading, followed by the version.
    pub title: String,
    pub version: String,
    pub width: usize,
}

impl PageOptions {
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            version: version.into(),
            width: crate::DEFAULT_WIDTH,
        }
    }

    /// File name of this version's page, e.g. `settings3-6.html`.
    pub fn permalink(&self) -> String {
        format!("settings{}.html", doc_id(&self.version))
    }
}

const PAGE_STYLE: &str = "\
body { font-family: sans-serif; margin: 2em; }
pre { font-size: 90%; }
.cm { color: #800080; }
.expert { display: none; }
body.show-expert .expert { display: block; }
";

/// Render a complete HTML page documenting `root`.
pub fn render_html_page(root: &Field, options: &PageOptions) -> Result<String, CompileError> {
    let body = render_html(root, options.width)?;
    let title = escape(&format!("{} {}", options.title, options.version));
    let permalink = escape(&options.permalink());

    let mut out = String::new();
    out.push_str("<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{title}</title>\n"));
    out.push_str(&format!("<style>\n{PAGE_STYLE}</style>\n"));
    out.push_str("</head>\n<body>\n");
    out.push_str(&format!("<h2>{title}</h2>\n"));
    out.push_str(&format!(
        "<p>Permalink: <a href=\"{permalink}\">{permalink}</a></p>\n"
    ));
    out.push_str(
        "<p><label><input type=checkbox \
         onchange=\"document.body.classList.toggle('show-expert', this.checked)\"> \
         show expert settings</label></p>\n",
    );
    out.push_str("<pre>\n");
    out.push_str(&body);
    out.push_str("</pre>\n</body>\n</html>\n");
    Ok(out)
}
