use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn docschema(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_docschema"))
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("failed to run docschema")
}

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// Minimal document tree: a root command with two subcommands.
fn write_tree(root: &Path) {
    write(
        root,
        "tool/tool.md",
        "# Description\nA demo tool.\n\n# Options\n```json\n[{\"flags\": \"--verbose\", \"type\": \"boolean\"}]\n```\n",
    );
    write(root, "tool/build/build.md", "# Description\nBuild it.\n");
    write(
        root,
        "tool/serve/serve.md",
        "# Arguments\n```json\n[{\"name\": \"port\", \"default\": \"8080\"}]\n```\n",
    );
}

// ---------------------------------------------------------------------------
// parse
// ---------------------------------------------------------------------------

#[test]
fn parse_directory_prints_schema_json() {
    let dir = tempfile::tempdir().unwrap();
    write_tree(dir.path());

    let out = docschema(&["parse", "tool"], dir.path());
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["name"], "tool");
    assert_eq!(value["description"], "A demo tool.");
    assert_eq!(value["options"][0]["flags"], "--verbose");
    assert_eq!(value["commands"][0]["name"], "build");
    assert_eq!(value["commands"][1]["name"], "serve");
    assert_eq!(value["commands"][1]["arguments"][0]["default"], "8080");
}

#[test]
fn parse_directory_as_yaml() {
    let dir = tempfile::tempdir().unwrap();
    write_tree(dir.path());

    let out = docschema(&["parse", "tool", "--format", "yaml"], dir.path());
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("name: tool"), "{stdout}");
}

#[test]
fn parse_uses_config_file_defaults() {
    let dir = tempfile::tempdir().unwrap();
    write_tree(dir.path());
    fs::write(dir.path().join(".docschema.yml"), "format: yaml\n").unwrap();

    let out = docschema(&["parse", "tool"], dir.path());
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("name: tool"));

    // command-line flag wins over the file
    let out = docschema(&["parse", "tool", "--format", "json", "--compact"], dir.path());
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.trim_start().starts_with('{'));
    assert_eq!(stdout.trim_end().lines().count(), 1);
}

#[test]
fn parse_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    write_tree(dir.path());

    let out = docschema(&["parse", "tool", "--output", "out/schema.json"], dir.path());
    assert!(out.status.success());

    let raw = fs::read_to_string(dir.path().join("out/schema.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["name"], "tool");
}

#[test]
fn parse_schema_file_reports_validated() {
    let dir = tempfile::tempdir().unwrap();
    write_tree(dir.path());

    let out = docschema(&["parse", "tool", "--output", "schema.json"], dir.path());
    assert!(out.status.success());

    let out = docschema(&["parse", "schema.json"], dir.path());
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), "validated");
}

#[test]
fn parse_schema_file_checks_structure() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("dup.json"),
        r#"{"name": "tool", "commands": [{"name": "a"}, {"name": "a"}]}"#,
    )
    .unwrap();

    let lenient = docschema(&["parse", "dup.json"], dir.path());
    assert!(lenient.status.success());
    assert_eq!(String::from_utf8_lossy(&lenient.stdout).trim(), "validated");
    assert!(String::from_utf8_lossy(&lenient.stderr).contains("duplicate command"));

    let strict = docschema(&["parse", "dup.json", "--strict"], dir.path());
    assert!(!strict.status.success());
    assert!(strict.stdout.is_empty());
}

#[test]
fn parse_fails_on_malformed_document() {
    let dir = tempfile::tempdir().unwrap();
    write_tree(dir.path());
    write(dir.path(), "tool/build/build.md", "# Options\n```json\n[oops\n```\n");

    let out = docschema(&["parse", "tool"], dir.path());
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("build.md"), "{stderr}");
}

#[test]
fn parse_strict_rejects_duplicate_options() {
    let dir = tempfile::tempdir().unwrap();
    write_tree(dir.path());
    write(
        dir.path(),
        "tool/build/build.md",
        "# Options\n```json\n[{\"flags\": \"-o\"}, {\"flags\": \"-o\"}]\n```\n",
    );

    let lenient = docschema(&["parse", "tool"], dir.path());
    assert!(lenient.status.success());
    assert!(String::from_utf8_lossy(&lenient.stderr).contains("duplicate option"));

    let strict = docschema(&["parse", "tool", "--strict"], dir.path());
    assert!(!strict.status.success());
}

// ---------------------------------------------------------------------------
// validate / sections
// ---------------------------------------------------------------------------

#[test]
fn validate_accepts_and_rejects() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("good.json"),
        r#"{"name": "tool", "commands": [{"name": "a"}, {"name": "b"}]}"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("bad.json"),
        r#"{"name": "tool", "commands": [{"name": "a"}, {"name": "a"}]}"#,
    )
    .unwrap();

    let out = docschema(&["validate", "good.json"], dir.path());
    assert!(out.status.success());

    let out = docschema(&["validate", "good.json", "bad.json"], dir.path());
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("bad.json"));
}

#[test]
fn sections_prints_snippets() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "doc.md", "# Examples\nList:\n```sh\nls\n```\n");

    let out = docschema(&["sections", "doc.md"], dir.path());
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value[0]["title"], "Examples");
    assert_eq!(value[0]["snippets"][1]["language"], "sh");
    assert_eq!(value[0]["snippets"][1]["content"], "ls");
}

// ---------------------------------------------------------------------------
// init
// ---------------------------------------------------------------------------

#[test]
fn init_writes_default_config() {
    let dir = tempfile::tempdir().unwrap();

    let out = docschema(&["init"], dir.path());
    assert!(out.status.success());
    let raw = fs::read_to_string(dir.path().join(".docschema.yml")).unwrap();
    assert!(raw.contains("format: json"), "{raw}");
    assert!(raw.contains("pretty: true"), "{raw}");

    let again = docschema(&["init"], dir.path());
    assert!(!again.status.success());
    assert!(String::from_utf8_lossy(&again.stderr).contains("already exists"));

    let forced = docschema(&["init", "--force"], dir.path());
    assert!(forced.status.success());
}

#[test]
fn init_config_is_picked_up_by_parse() {
    let dir = tempfile::tempdir().unwrap();
    write_tree(dir.path());

    let out = docschema(&["--config", "custom.yml", "init"], dir.path());
    assert!(out.status.success());
    assert!(dir.path().join("custom.yml").is_file());

    let out = docschema(&["--config", "custom.yml", "parse", "tool"], dir.path());
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["name"], "tool");
}
