//! Name derivation for generated identifiers.

/// Derive the struct member identifier from a field name.
///
/// The first character is lowercased and the rest is kept verbatim, so
/// `UIFontSize` becomes `uIFontSize`. `URL` is the one acronym that is
/// lowercased whole.
pub fn lower_camel(name: &str) -> String {
    if name == "URL" {
        return "url".to_string();
    }
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Singular form of an array field name, used as its element struct name.
pub fn singular(name: &str) -> String {
    name.strip_suffix('s').unwrap_or(name).to_string()
}

/// Document id for a version string: `3.6` becomes `3-6`.
pub fn doc_id(version: &str) -> String {
    version.replace('.', "-")
}
