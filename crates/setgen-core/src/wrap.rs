//! # Word Wrapping
//!
//! Greedy wrapping over pre-built [`Piece`]s. A piece is the unit the
//! wrapper never splits: a plain word, or a whole rendered hyperlink. Its
//! `width` is the number of visible columns it occupies, which may differ
//! from the byte length of its text once markup is applied.
//!
//! A line always receives at least one piece, so a piece wider than the
//! wrap width sits alone on its own line rather than being broken.

/// An unsplittable unit of wrapped text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    text: String,
    width: usize,
}

impl Piece {
    /// A piece whose rendered text and visible width are given separately.
    pub fn new(text: impl Into<String>, width: usize) -> Self {
        Self {
            text: text.into(),
            width,
        }
    }

    /// A piece whose visible width is its character count.
    pub fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        let width = text.chars().count();
        Self { text, width }
    }

    /// Rendered text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Visible width in columns.
    pub fn width(&self) -> usize {
        self.width
    }
}

/// Greedily pack `pieces` into lines of at most `width` visible columns,
/// separating pieces on a line by one space.
pub fn wrap(pieces: &[Piece], width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut used = 0usize;
    let mut started = false;

    for piece in pieces {
        if started && used + 1 + piece.width > width {
            lines.push(std::mem::take(&mut line));
            used = 0;
            started = false;
        }
        if started {
            line.push(' ');
            used += 1;
        }
        line.push_str(&piece.text);
        used += piece.width;
        started = true;
    }
    if started {
        lines.push(line);
    }
    lines
}

/// Wrap whitespace-separated words of `text`.
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let pieces: Vec<Piece> = text.split_whitespace().map(Piece::plain).collect();
    wrap(&pieces, width)
}
