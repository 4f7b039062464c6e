//! # Inline Link Syntax
//!
//! Comments may embed `[label](url)` links. The label can contain spaces,
//! so a link opened by a `[` keeps absorbing the following words until
//! one of them closes it with `](url)`. The `[` need not start its word:
//! text glued before it (an opening parenthesis, say) becomes the link's
//! prefix, and text glued after the closing parenthesis becomes its tail.
//! Both stay with the link so the wrapper cannot separate them.
//!
//! A `[` that never closes is not a link; its words come back as plain
//! words.

/// One unsplittable unit of comment text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Word(String),
    Link {
        /// Text directly before the opening `[`.
        prefix: String,
        label: String,
        url: String,
        /// Text directly after the closing `)`.
        tail: String,
    },
}

/// Split `text` into words and links.
pub fn tokenize(text: &str) -> Vec<Inline> {
    let mut out = Vec::new();
    let mut prefix = "";
    let mut pending: Vec<&str> = Vec::new();

    for word in text.split_whitespace() {
        let open = word.find('[');
        match open {
            None if pending.is_empty() => {
                out.push(Inline::Word(word.to_string()));
                continue;
            }
            None => pending.push(word),
            Some(at) => {
                flush(&mut out, prefix, &mut pending);
                prefix = &word[..at];
                pending.push(&word[at..]);
            }
        }
        if let Some(link) = parse_link(prefix, &pending.join(" ")) {
            out.push(link);
            pending.clear();
            prefix = "";
        }
    }
    flush(&mut out, prefix, &mut pending);
    out
}

/// Give back an unclosed link's words as plain words.
fn flush(out: &mut Vec<Inline>, prefix: &str, pending: &mut Vec<&str>) {
    for (i, word) in pending.drain(..).enumerate() {
        let word = if i == 0 {
            format!("{prefix}{word}")
        } else {
            word.to_string()
        };
        out.push(Inline::Word(word));
    }
}

fn parse_link(prefix: &str, s: &str) -> Option<Inline> {
    let body = s.strip_prefix('[')?;
    let split = body.find("](")?;
    let label = &body[..split];
    let rest = &body[split + 2..];
    let close = rest.find(')')?;
    let url = &rest[..close];
    if url.is_empty() || url.contains(char::is_whitespace) {
        return None;
    }
    Some(Inline::Link {
        prefix: prefix.to_string(),
        label: label.to_string(),
        url: url.to_string(),
        tail: rest[close + 1..].to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(w: &str) -> Inline {
        Inline::Word(w.to_string())
    }

    #[test]
    fn plain_words() {
        assert_eq!(tokenize("  color  themes "), vec![word("color"), word("themes")]);
    }

    #[test]
    fn link_spanning_words() {
        let tokens = tokenize("See [docs for more information](https://example.org/x). Done");
        assert_eq!(
            tokens,
            vec![
                word("See"),
                Inline::Link {
                    prefix: String::new(),
                    label: "docs for more information".into(),
                    url: "https://example.org/x".into(),
                    tail: ".".into(),
                },
                word("Done"),
            ]
        );
    }

    #[test]
    fn single_word_link() {
        assert_eq!(
            tokenize("[docs](http://a.b)"),
            vec![Inline::Link {
                prefix: String::new(),
                label: "docs".into(),
                url: "http://a.b".into(),
                tail: String::new(),
            }]
        );
    }

    #[test]
    fn unterminated_bracket_falls_back_to_words() {
        assert_eq!(
            tokenize("values [in brackets"),
            vec![word("values"), word("[in"), word("brackets")]
        );
    }

    #[test]
    fn new_bracket_restarts_the_link() {
        assert_eq!(
            tokenize("[x [docs](u)"),
            vec![
                word("[x"),
                Inline::Link {
                    prefix: String::new(),
                    label: "docs".into(),
                    url: "u".into(),
                    tail: String::new(),
                },
            ]
        );
    }

    #[test]
    fn punctuation_before_the_bracket_stays_with_the_link() {
        assert_eq!(
            tokenize("file types ([the docs](https://example.org/x))"),
            vec![
                word("file"),
                word("types"),
                Inline::Link {
                    prefix: "(".into(),
                    label: "the docs".into(),
                    url: "https://example.org/x".into(),
                    tail: ")".into(),
                },
            ]
        );
    }

    #[test]
    fn unclosed_glued_bracket_keeps_its_prefix() {
        assert_eq!(
            tokenize("a ([b c"),
            vec![word("a"), word("([b"), word("c")]
        );
    }

    #[test]
    fn bracket_without_url_is_not_a_link() {
        assert_eq!(tokenize("[a] b"), vec![word("[a]"), word("b")]);
    }
}
