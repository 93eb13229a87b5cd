use folio::load_config::{load_config, load_profile, GITHUB_TOKEN_ENV};
use serial_test::serial;
use std::env;
use std::fs::write;
use std::path::PathBuf;
use tempfile::{NamedTempFile, TempDir};

/// A full config loads, and the relative profile path resolves next to the config file.
#[test]
#[serial]
fn test_load_config_success_with_all_sections() {
    let dir = TempDir::new().expect("temp dir");
    let config_path = dir.path().join("folio.yaml");
    let config_yaml = r#"
profile: ./data/profile.yaml
export:
  output_dir: ./tmp/exports
  image_path: ./public/avatar.jpg
  max_projects: 4
github:
  api_base: http://localhost:8080
  username: octocat
  events_per_page: 30
"#;
    write(&config_path, config_yaml).unwrap();
    env::remove_var(GITHUB_TOKEN_ENV);

    let config = load_config(&config_path).expect("Config should load");

    assert_eq!(config.profile, dir.path().join("./data/profile.yaml"));
    assert_eq!(config.export.output_dir, PathBuf::from("./tmp/exports"));
    let pdf = config.export.pdf_options();
    assert_eq!(pdf.max_projects, 4);
    assert_eq!(pdf.image_path, Some(PathBuf::from("./public/avatar.jpg")));

    let github = config.github.expect("github section present");
    assert_eq!(github.username, "octocat");
    assert_eq!(github.token, None);
    let client = github.client_config();
    assert_eq!(client.api_base, "http://localhost:8080");
    assert_eq!(client.repos_per_page, 6);
    assert_eq!(client.events_per_page, 30);
}

/// Optional sections and keys fall back to their defaults.
#[test]
#[serial]
fn test_load_config_defaults_optional_fields() {
    let config_yaml = r#"
profile: /abs/profile.yaml
export:
  output_dir: ./out
"#;
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), config_yaml).unwrap();

    let config = load_config(config_file.path()).expect("Config should load");

    assert_eq!(config.profile, PathBuf::from("/abs/profile.yaml"));
    assert!(config.github.is_none());
    let pdf = config.export.pdf_options();
    assert_eq!(pdf.max_projects, 8);
    assert_eq!(pdf.image_path, None);
}

/// The token comes from the environment only, and a blank token counts as unset.
#[test]
#[serial]
fn test_load_config_injects_github_token_from_env() {
    let config_yaml = r#"
profile: profile.yaml
export:
  output_dir: ./out
github:
  username: octocat
"#;
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), config_yaml).unwrap();

    env::set_var(GITHUB_TOKEN_ENV, "ghp_test_token");
    let config = load_config(config_file.path()).expect("Config should load");
    let github = config.github.expect("github section present");
    assert_eq!(github.token.as_deref(), Some("ghp_test_token"));
    assert_eq!(github.client_config().token.as_deref(), Some("ghp_test_token"));
    assert!(!format!("{github:?}").contains("ghp_test_token"));

    env::set_var(GITHUB_TOKEN_ENV, "   ");
    let config = load_config(config_file.path()).expect("Config should load");
    assert_eq!(config.github.and_then(|g| g.token), None);

    env::remove_var(GITHUB_TOKEN_ENV);
}

/// A token in the file is ignored; only the environment supplies secrets.
#[test]
#[serial]
fn test_load_config_ignores_token_in_file() {
    let config_yaml = r#"
profile: profile.yaml
export:
  output_dir: ./out
github:
  username: octocat
  token: from-file
"#;
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), config_yaml).unwrap();
    env::remove_var(GITHUB_TOKEN_ENV);

    let config = load_config(config_file.path()).expect("Config should load");
    assert_eq!(config.github.and_then(|g| g.token), None);
}

/// If the config file is not valid YAML, load_config errors and reports as such.
#[test]
#[serial]
fn test_load_config_errors_for_invalid_file() {
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), "export: [not: valid").unwrap();

    let err = load_config(config_file.path()).expect_err("Invalid YAML must fail");
    assert!(
        err.to_string().contains("Failed to parse config YAML"),
        "unexpected error: {err}"
    );
}

/// A missing required section fails to parse.
#[test]
#[serial]
fn test_load_config_errors_on_missing_export_section() {
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), "profile: profile.yaml\n").unwrap();

    let err = load_config(config_file.path()).expect_err("Missing export must fail");
    assert!(err.to_string().contains("export"), "unexpected error: {err}");
}

#[test]
#[serial]
fn test_load_config_errors_for_missing_file() {
    let err = load_config("/definitely/not/here/folio.yaml").expect_err("Missing file must fail");
    assert!(err.to_string().contains("Failed to read config file"));
}

#[test]
fn test_load_profile_reads_demo_document() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos/profile.yaml");

    let data = load_profile(&path).expect("Demo profile should load");

    assert_eq!(data.profile.name, "Andressa Silva");
    assert_eq!(data.projects.len(), 4);
    assert_eq!(data.skills.languages.len(), 3);
    assert!(data.projects[2].title.en.is_none());
}

#[test]
fn test_load_profile_errors_for_malformed_document() {
    let file = NamedTempFile::new().expect("temp file");
    write(file.path(), "profile:\n  name: Only a name\n").unwrap();

    let err = load_profile(file.path()).expect_err("Incomplete profile must fail");
    assert!(err.to_string().contains("Failed to parse profile YAML"));
}
