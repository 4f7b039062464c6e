//! C string literal quoting.

/// Quote `s` as a C string literal.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    push_escaped(&mut out, s);
    out.push('"');
    out
}

/// Quote several strings as one literal separated by embedded NULs.
pub fn quote_joined<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = String::from("\"");
    for (i, part) in parts.into_iter().enumerate() {
        if i > 0 {
            out.push_str("\\0");
        }
        push_escaped(&mut out, part);
    }
    out.push('"');
    out
}

fn push_escaped(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
}
