//! `setgen gen` against a scratch directory.

use std::fs;
use std::path::{Path, PathBuf};

use setgen_cli::generate::{plan_outputs, run_gen, GenArgs};
use setgen_cli::inspect::{inspect, InspectArgs, Stage};
use setgen_cli::config::Config;

const SCHEMA: &str = r#"
roots:
  - name: GlobalPrefs
    type: Struct
    fields:
      - type: Comment
        comment: "see https://example.org/settings{doc_id}.html"
      - name: ShowToolbar
        type: Bool
        default: true
        comment: if true, we show the toolbar
      - name: Themes
        type: Array
        comment: color themes
        fields:
          - { name: Name, type: String, comment: name of the theme }
"#;

const CONFIG: &str = r#"
schema: settings.yaml
version: "3.6"
header:
  path: out/Settings.h
  marker: "// generated below"
text_doc:
  path: out/settings.txt
  marker: "; generated below"
html_doc:
  path: out/settings.html
  title: Settings
"#;

fn scratch() -> (tempfile::TempDir, PathBuf) {
    scratch_with(CONFIG)
}

/// `CONFIG` with a formatter on the header.
fn scratch_formatted(formatter: &str) -> (tempfile::TempDir, PathBuf) {
    let config = CONFIG.replace(
        "  marker: \"// generated below\"\n",
        &format!("  marker: \"// generated below\"\n  formatter:\n{formatter}"),
    );
    scratch_with(&config)
}

fn scratch_with(config: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("settings.yaml"), SCHEMA).unwrap();
    fs::write(root.join("setgen.yaml"), config).unwrap();
    fs::create_dir_all(root.join("out")).unwrap();
    fs::write(
        root.join("out/Settings.h"),
        "// hand written\n#pragma once\n// generated below\nstale\n",
    )
    .unwrap();
    fs::write(root.join("out/settings.txt"), "intro\n; generated below\n").unwrap();
    let config = root.join("setgen.yaml");
    (dir, config)
}

fn read(dir: &Path, rel: &str) -> String {
    fs::read_to_string(dir.join(rel)).unwrap()
}

#[test]
fn writes_every_output() {
    let (dir, config) = scratch();
    assert_eq!(run_gen(&GenArgs::default(), &config).unwrap(), 0);

    let header = read(dir.path(), "out/Settings.h");
    assert!(header.starts_with("// hand written\n#pragma once\n// generated below\n// color themes\nstruct Theme {"));
    assert!(!header.contains("stale"));
    assert!(header.contains("(intptr_t)\"see https://example.org/settings3-6.html\""));

    let text = read(dir.path(), "out/settings.txt");
    assert!(text.starts_with("intro\n; generated below\n; if true, we show the toolbar\nShowToolbar = true\n"));

    let html = read(dir.path(), "out/settings.html");
    assert!(html.contains("<title>Settings 3.6</title>"));
}

#[test]
fn check_detects_stale_outputs() {
    let (dir, config) = scratch();
    let check = GenArgs {
        check: true,
        ..GenArgs::default()
    };
    assert_eq!(run_gen(&check, &config).unwrap(), 1);

    run_gen(&GenArgs::default(), &config).unwrap();
    assert_eq!(run_gen(&check, &config).unwrap(), 0);

    fs::write(dir.path().join("out/settings.html"), "edited").unwrap();
    assert_eq!(run_gen(&check, &config).unwrap(), 1);
}

const APPEND_FOOTER: &str = "    - sh\n    - -c\n    - 'echo \"// formatted\" >> \"$0\"'\n";

#[test]
fn check_compares_the_formatted_header() {
    let (dir, config) = scratch_formatted(APPEND_FOOTER);
    run_gen(&GenArgs::default(), &config).unwrap();
    assert!(read(dir.path(), "out/Settings.h").ends_with("// formatted\n"));

    let check = GenArgs {
        check: true,
        ..GenArgs::default()
    };
    assert_eq!(run_gen(&check, &config).unwrap(), 0);

    let header = read(dir.path(), "out/Settings.h").replace("showToolbar", "hideToolbar");
    fs::write(dir.path().join("out/Settings.h"), header).unwrap();
    assert_eq!(run_gen(&check, &config).unwrap(), 1);

    let leftovers = fs::read_dir(dir.path().join("out"))
        .unwrap()
        .filter(|e| e.as_ref().unwrap().file_name().to_string_lossy().starts_with(".setgen-check-"))
        .count();
    assert_eq!(leftovers, 0);
}

#[test]
fn failing_formatter_runs_after_every_write() {
    let (dir, config) = scratch_formatted("    - \"false\"\n");
    let err = run_gen(&GenArgs::default(), &config).unwrap_err();
    assert!(format!("{err:#}").contains("formatter false failed"));

    assert!(!read(dir.path(), "out/Settings.h").contains("stale"));
    assert!(read(dir.path(), "out/settings.txt").contains("ShowToolbar = true"));
    assert!(dir.path().join("out/settings.html").exists());
}

#[test]
fn version_override_changes_the_stamp() {
    let (dir, config) = scratch();
    let args = GenArgs {
        doc_version: Some("3.7".into()),
        ..GenArgs::default()
    };
    run_gen(&args, &config).unwrap();
    assert!(read(dir.path(), "out/Settings.h").contains("settings3-7.html"));
}

#[test]
fn missing_marker_writes_nothing() {
    let (dir, config) = scratch();
    fs::write(dir.path().join("out/settings.txt"), "no marker here\n").unwrap();

    let err = run_gen(&GenArgs::default(), &config).unwrap_err();
    assert!(format!("{err:#}").contains("marker line not found"));
    assert!(read(dir.path(), "out/Settings.h").contains("stale"));
    assert!(!dir.path().join("out/settings.html").exists());
}

#[test]
fn schema_errors_write_nothing() {
    let (dir, config) = scratch();
    fs::write(
        dir.path().join("settings.yaml"),
        "roots:\n  - { name: GlobalPrefs, type: Struct, fields: [ { name: X, type: Number } ] }\n",
    )
    .unwrap();

    let err = run_gen(&GenArgs::default(), &config).unwrap_err();
    assert!(format!("{err:#}").contains("X"));
    assert!(read(dir.path(), "out/Settings.h").contains("stale"));
}

#[test]
fn plans_outputs_in_config_order() {
    let (_dir, config) = scratch();
    let outputs = plan_outputs(&Config::load(&config).unwrap()).unwrap();
    let names: Vec<_> = outputs
        .iter()
        .map(|o| o.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["Settings.h", "settings.txt", "settings.html"]);
}

#[test]
fn inspect_dumps_tables_as_json() {
    let (_dir, config) = scratch();
    let args = InspectArgs {
        stage: Stage::Tables,
        pretty: false,
    };
    let json: serde_json::Value = serde_json::from_str(&inspect(&args, &config).unwrap()).unwrap();
    let tables = json.as_array().unwrap();
    assert_eq!(tables.len(), 2);
    assert_eq!(tables[1]["struct_name"], "GlobalPrefs");
}
