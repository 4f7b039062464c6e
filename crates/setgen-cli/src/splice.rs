//! Marker-based splicing into existing files.

use anyhow::{bail, Result};

/// Keep `existing` up to and including the first line equal to `marker`
/// (ignoring surrounding whitespace) and replace everything after it with
/// `generated`.
pub fn splice(existing: &str, marker: &str, generated: &str) -> Result<String> {
    let mut offset = 0;
    for line in existing.split_inclusive('\n') {
        offset += line.len();
        if line.trim() == marker.trim() {
            let mut out = existing[..offset].to_string();
            if !out.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(generated);
            return Ok(out);
        }
    }
    bail!("marker line not found: {marker:?}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_everything_after_the_marker() {
        let existing = "prologue\n// gen\nold 1\nold 2\n";
        assert_eq!(
            splice(existing, "// gen", "new\n").unwrap(),
            "prologue\n// gen\nnew\n"
        );
    }

    #[test]
    fn marker_on_last_line_without_newline() {
        assert_eq!(splice("a\n// gen", "// gen", "b\n").unwrap(), "a\n// gen\nb\n");
    }

    #[test]
    fn first_marker_wins() {
        assert_eq!(splice("M\nx\nM\ny\n", "M", "z\n").unwrap(), "M\nz\n");
    }

    #[test]
    fn missing_marker_fails() {
        let err = splice("nothing here\n", "// gen", "x").unwrap_err();
        assert!(err.to_string().contains("marker line not found"));
    }

    #[test]
    fn marker_must_be_the_whole_line() {
        assert!(splice("see // gen below\n", "// gen", "x").is_err());
    }
}
