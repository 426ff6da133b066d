//! Tests for config functionality.

use crate::config::Config;
use crate::error::StencilError;
use crate::template::Value;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.modname, "");
    assert_eq!(config.source_dir, "");
    assert_eq!(config.tests_dir, "tests");
    assert_eq!(config.docs_dir, "doc-source");
    assert!(config.enable_tests);
    assert!(config.enable_docs);
    assert!(config.enable_pre_commit);
    assert!(config.on_pypi);
    assert!(!config.enable_conda);
    assert!(config.conda_channels.is_empty());
    assert!(config.event_log.is_none());
    assert!(config.extra.is_empty());
    assert_eq!(config.version, "0.0.0");
    assert_eq!(config.platforms, vec!["Windows", "macOS", "Linux"]);
    assert_eq!(config.travis_site, "com");
    assert!(!config.docker_shields);
    assert_eq!(config.unique_name, "");
}

#[test]
fn test_parse_minimal_yaml() {
    let config = Config::from_yaml("modname: hello-world\n").unwrap();

    assert_eq!(config.modname, "hello-world");
    assert_eq!(config.tests_dir, "tests");
    assert!(config.enable_tests);
}

#[test]
fn test_empty_yaml_requires_modname() {
    let err = Config::from_yaml("").unwrap_err();
    assert!(err.to_string().contains("modname must be set"));
}

#[test]
fn test_parse_full_yaml() {
    let yaml = r#"
modname: hello-world
import_name: hello
repo_name: HelloWorld
pypi_name: hello-world-py
username: octocat
short_desc: Says hello.
source_dir: src
tests_dir: testing
docs_dir: docs
enable_tests: false
enable_docs: false
enable_pre_commit: false
on_pypi: false
enable_conda: true
conda_channels:
  - conda-forge
extra_lint_fix: [E999]
extra_lint_warning: [W605]
event_log: .stencil/events.jsonl
extra:
  python_version: "3.8"
"#;
    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.import_name(), "hello");
    assert_eq!(config.repo_name(), "HelloWorld");
    assert_eq!(config.pypi_name(), "hello-world-py");
    assert_eq!(config.username, "octocat");
    assert_eq!(config.short_desc, "Says hello.");
    assert_eq!(config.source_path(), "src/hello");
    assert_eq!(config.tests_dir, "testing");
    assert_eq!(config.docs_dir, "docs");
    assert!(!config.enable_tests);
    assert!(!config.enable_docs);
    assert!(!config.enable_pre_commit);
    assert!(!config.on_pypi);
    assert!(config.enable_conda);
    assert_eq!(config.conda_channels, vec!["conda-forge"]);
    assert_eq!(config.extra_lint_fix, vec!["E999"]);
    assert_eq!(config.extra_lint_warning, vec!["W605"]);
    assert_eq!(config.event_log.as_deref(), Some(".stencil/events.jsonl"));
    assert!(config.extra.contains_key("python_version"));
}

#[test]
fn test_parse_yaml_with_unknown_fields() {
    let yaml = r#"
modname: hello
future_option: true
another_unknown:
  nested: value
"#;
    let config = Config::from_yaml(yaml).unwrap();
    assert_eq!(config.modname, "hello");
}

#[test]
fn test_derived_names_fall_back_to_modname() {
    let config = Config::from_yaml("modname: hello-world\n").unwrap();

    assert_eq!(config.import_name(), "hello_world");
    assert_eq!(config.repo_name(), "hello-world");
    assert_eq!(config.pypi_name(), "hello-world");
    assert_eq!(config.source_path(), "hello_world");
}

#[test]
fn test_pypi_name_falls_back_to_repo_name() {
    let config = Config::from_yaml("modname: hello\nrepo_name: hello-repo\n").unwrap();
    assert_eq!(config.pypi_name(), "hello-repo");
}

#[test]
fn test_source_path_ignores_trailing_slash() {
    let config = Config::from_yaml("modname: hello\nsource_dir: src/\n").unwrap();
    assert_eq!(config.source_path(), "src/hello");
}

#[test]
fn test_lint_dirs_follow_enable_tests() {
    let config = Config::from_yaml("modname: hello\n").unwrap();
    assert_eq!(config.lint_dirs(), vec!["hello", "tests"]);

    let config = Config::from_yaml("modname: hello\nenable_tests: false\n").unwrap();
    assert_eq!(config.lint_dirs(), vec!["hello"]);
}

#[test]
fn test_validate_blank_modname() {
    let err = Config::from_yaml("modname: '   '\n").unwrap_err();
    assert!(matches!(err, StencilError::UserError(_)));
    assert!(err.to_string().contains("modname"));
}

#[test]
fn test_validate_conda_requires_channels() {
    let err = Config::from_yaml("modname: hello\nenable_conda: true\n").unwrap_err();
    assert!(err.to_string().contains("conda_channels"));
}

#[test]
fn test_validate_empty_tests_dir_with_tests_enabled() {
    let err = Config::from_yaml("modname: hello\ntests_dir: ''\n").unwrap_err();
    assert!(err.to_string().contains("tests_dir"));

    // Accepted once tests are disabled.
    Config::from_yaml("modname: hello\ntests_dir: ''\nenable_tests: false\n").unwrap();
}

#[test]
fn test_validate_absolute_dirs() {
    let err = Config::from_yaml("modname: hello\ndocs_dir: /srv/docs\n").unwrap_err();
    assert!(err.to_string().contains("docs_dir"));
    assert!(err.to_string().contains("/srv/docs"));
}

#[test]
fn test_validate_unknown_platform() {
    let err = Config::from_yaml("modname: hello\nplatforms: [Linux, BeOS]\n").unwrap_err();
    assert!(err.to_string().contains("unknown platform 'BeOS'"));

    Config::from_yaml("modname: hello\nplatforms: [Linux]\n").unwrap();
}

#[test]
fn test_validate_travis_site() {
    let err = Config::from_yaml("modname: hello\ntravis_site: net\n").unwrap_err();
    assert!(err.to_string().contains("travis_site"));

    Config::from_yaml("modname: hello\ntravis_site: org\n").unwrap();
}

#[test]
fn test_unique_suffix_gains_leading_underscore() {
    let mut config = Config::from_yaml("modname: hello\n").unwrap();
    assert_eq!(config.unique_suffix(), "");

    config.unique_name = "demo".to_string();
    assert_eq!(config.unique_suffix(), "_demo");

    config.unique_name = "_demo".to_string();
    assert_eq!(config.unique_suffix(), "_demo");
}

#[test]
fn test_docker_name_falls_back_to_lowercase_repo() {
    let config = Config::from_yaml("modname: Hello\nrepo_name: Hello-Repo\n").unwrap();
    assert_eq!(config.docker_name(), "hello-repo");

    let named = Config::from_yaml("modname: Hello\ndocker_name: hello-image\n").unwrap();
    assert_eq!(named.docker_name(), "hello-image");
}

#[test]
fn test_to_context_includes_shields() {
    let config = Config::from_yaml("modname: hello\nusername: octocat\nunique_name: demo\n").unwrap();
    let ctx = config.to_context_in(2026).unwrap();

    assert_eq!(ctx.get("unique_name"), Some(&Value::from("_demo")));
    assert_eq!(ctx.get("docker_name"), Some(&Value::from("hello")));
    assert_eq!(ctx.get("platforms"), Some(&Value::from(vec!["Windows", "macOS", "Linux"])));
    let Some(Value::Map(shields)) = ctx.get("shields") else {
        panic!("shields should be a mapping");
    };
    assert_eq!(
        shields.get("maintained"),
        Some(&Value::from(
            "image:: https://img.shields.io/maintenance/yes/2026\n\t:alt: Maintenance"
        ))
    );
    assert_eq!(shields.len(), 23);
}

#[test]
fn test_invalid_yaml_is_user_error() {
    let err = Config::from_yaml("modname: [unclosed\n").unwrap_err();
    assert!(err.to_string().contains("failed to parse config YAML"));
}

#[test]
fn test_config_roundtrip() {
    let original = Config::from_yaml("modname: hello\nusername: octocat\n").unwrap();
    let yaml = original.to_yaml().unwrap();
    let parsed = Config::from_yaml(&yaml).unwrap();

    assert_eq!(parsed.modname, original.modname);
    assert_eq!(parsed.username, original.username);
    assert_eq!(parsed.tests_dir, original.tests_dir);
    assert!(!yaml.contains("import_name"));
}

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "modname: from-disk").unwrap();

    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.modname, "from-disk");
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load(dir.path().join("stencil.yaml")).unwrap_err();
    assert!(err.to_string().contains("failed to read config file"));
}

#[test]
fn test_to_context_builtins() {
    let config = Config::from_yaml("modname: hello-world\nusername: octocat\n").unwrap();
    let ctx = config.to_context().unwrap();

    assert_eq!(ctx.get("modname"), Some(&Value::from("hello-world")));
    assert_eq!(ctx.get("import_name"), Some(&Value::from("hello_world")));
    assert_eq!(ctx.get("username"), Some(&Value::from("octocat")));
    assert_eq!(ctx.get("enable_tests"), Some(&Value::Bool(true)));
    assert_eq!(
        ctx.get("lint_dirs"),
        Some(&Value::from(vec!["hello_world", "tests"]))
    );
    assert!(ctx.contains("managed_message"));
    assert!(ctx.contains("lint_fix_list"));
    assert!(ctx.contains("code_only_warning"));
}

#[test]
fn test_to_context_appends_extra_lint_codes() {
    let config = Config::from_yaml("modname: hello\nextra_lint_fix: [E999, W291]\n").unwrap();
    let ctx = config.to_context().unwrap();

    let fixes = ctx.get("lint_fix_list").and_then(Value::as_seq).unwrap();
    assert_eq!(fixes.last(), Some(&Value::from("E999")));
    // W291 is already a default and is not repeated.
    let w291 = fixes.iter().filter(|v| v.as_str() == Some("W291")).count();
    assert_eq!(w291, 1);
}

#[test]
fn test_to_context_includes_extra() {
    let yaml = r#"
modname: hello
extra:
  python_versions: ["3.8", 3.9]
  gone: ~
"#;
    let ctx = Config::from_yaml(yaml).unwrap().to_context().unwrap();

    assert_eq!(
        ctx.get("python_versions"),
        Some(&Value::from(vec!["3.8", "3.9"]))
    );
    assert!(!ctx.contains("gone"));
}

#[test]
fn test_to_context_rejects_shadowing_extra() {
    let yaml = "modname: hello\nextra:\n  modname: other\n";
    let err = Config::from_yaml(yaml).unwrap().to_context().unwrap_err();

    assert!(err.to_string().contains("extra variable 'modname'"));
}

#[test]
fn test_to_context_rejects_unsupported_extra() {
    let yaml = "modname: hello\nextra:\n  items: [a, ~]\n";
    let err = Config::from_yaml(yaml).unwrap().to_context().unwrap_err();

    assert!(err.to_string().contains("extra.items[1]"));
}
