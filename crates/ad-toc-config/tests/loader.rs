use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use ad_toc_config::{
    BlockStyle, CollapseState, Config, ConfigError, ConfigSourceKind, LoadOptions, TocSettings,
};
use tempfile::TempDir;

fn write_file(path: impl AsRef<Path>, contents: &str) {
    let mut file = fs::File::create(path).expect("create config");
    file.write_all(contents.as_bytes()).expect("write config");
}

fn canonical(path: impl AsRef<Path>) -> PathBuf {
    fs::canonicalize(path).expect("canonicalize path")
}

#[test]
fn loads_defaults_when_no_files_present() {
    let temp = TempDir::new().expect("tempdir");
    let working_dir = canonical(temp.path());

    let config = Config::load(LoadOptions::default().with_working_dir(working_dir.clone()))
        .expect("load defaults");

    assert_eq!(config.toc, TocSettings::default());
    assert_eq!(config.toc.head_marker, "-------");
    assert_eq!(config.toc.tail_marker, "-----");
    assert_eq!(config.toc.style, BlockStyle::Fenced);
    assert_eq!(config.toc.fence_label, "ad-toc");
    assert_eq!(config.toc.title.active().map(String::as_str), Some("目录"));
    assert_eq!(config.toc.color.active().map(String::as_str), Some("#6496FF"));
    assert_eq!(config.toc.collapse.active(), Some(&CollapseState::Open));
    assert_eq!(config.toc.max_level, 3);

    assert_eq!(config.sources.working_directory, working_dir);
    assert_eq!(config.sources.layers.len(), 1);
    assert_eq!(config.sources.layers[0].kind, ConfigSourceKind::Default);
}

#[test]
fn applies_precedence_and_merges_fields() {
    let temp = TempDir::new().expect("tempdir");
    let git_root = canonical(temp.path());
    fs::create_dir(git_root.join(".git")).expect("create .git");

    write_file(
        git_root.join(".ad-toc.toml"),
        r#"
        [toc]
        fence_label = "outline"
        toc_level = 2
        "#,
    );

    let nested = git_root.join("docs");
    fs::create_dir(&nested).expect("create nested dir");
    write_file(
        nested.join(".ad-toc.toml"),
        r#"
        [toc]
        toc_level = 4
        enable_color = false
        "#,
    );

    let config =
        Config::load(LoadOptions::default().with_working_dir(&nested)).expect("load layered");

    assert_eq!(config.toc.fence_label, "outline");
    assert_eq!(config.toc.max_level, 4);
    assert!(!config.toc.color.enabled);
    assert_eq!(config.toc.color.value.as_deref(), Some("#6496FF"));

    let kinds: Vec<_> = config.sources.layers.iter().map(|layer| layer.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ConfigSourceKind::Default,
            ConfigSourceKind::GitRoot,
            ConfigSourceKind::Local
        ]
    );
}

#[test]
fn override_file_takes_highest_precedence() {
    let temp = TempDir::new().expect("tempdir");
    let working_dir = canonical(temp.path());

    write_file(
        working_dir.join(".ad-toc.toml"),
        "[toc]\nhead_marker = \"<!-- local -->\"\n",
    );
    write_file(
        working_dir.join("override.toml"),
        "[toc]\nhead_marker = \"<!-- override -->\"\nenable_code_block = false\n",
    );

    let config = Config::load(
        LoadOptions::default()
            .with_working_dir(&working_dir)
            .with_override_path("override.toml"),
    )
    .expect("load override");

    assert_eq!(config.toc.head_marker, "<!-- override -->");
    assert_eq!(config.toc.style, BlockStyle::Plain);
    assert_eq!(
        config.sources.layers.last().map(|layer| layer.kind),
        Some(ConfigSourceKind::Override)
    );
}

#[test]
fn reads_host_data_json_with_sentinels() {
    let temp = TempDir::new().expect("tempdir");
    let working_dir = canonical(temp.path());

    write_file(
        working_dir.join("data.json"),
        r#"{
            "headNoadTocTip": "<!-- toc -->",
            "tailNoadTocTip": "<!-- /toc -->",
            "enableCodeBlock": true,
            "codeBlockTitle": "ad-toc",
            "enableTitleContent": true,
            "titleContent": "none",
            "enableColorContent": true,
            "colorContent": "none",
            "enableCollapseContent": true,
            "collapseContent": "close",
            "tocLevel": 6
        }"#,
    );

    let config = Config::load(
        LoadOptions::default()
            .with_working_dir(&working_dir)
            .with_override_path("data.json"),
    )
    .expect("load host data");

    assert_eq!(config.toc.head_marker, "<!-- toc -->");
    assert_eq!(config.toc.tail_marker, "<!-- /toc -->");
    assert!(config.toc.title.enabled);
    assert!(config.toc.title.active().is_none());
    assert!(config.toc.color.active().is_none());
    assert_eq!(config.toc.collapse.active(), Some(&CollapseState::Close));
    assert_eq!(config.toc.max_level, 6);
    assert_eq!(
        config.sources.layers.last().map(|layer| layer.kind),
        Some(ConfigSourceKind::HostData)
    );
}

#[test]
fn host_data_merges_over_defaults() {
    let config = Config::from_host_data(r#"{"tocLevel": 1, "collapseContent": "none"}"#)
        .expect("parse host data");

    assert_eq!(config.toc.max_level, 1);
    assert!(config.toc.collapse.enabled);
    assert!(config.toc.collapse.active().is_none());
    assert_eq!(config.toc.fence_label, "ad-toc");
}

#[test]
fn rejects_out_of_range_level_and_unknown_collapse() {
    let temp = TempDir::new().expect("tempdir");
    let working_dir = canonical(temp.path());

    write_file(
        working_dir.join(".ad-toc.toml"),
        "[toc]\ntoc_level = 7\ncollapse = \"sideways\"\n",
    );

    let err = Config::load(LoadOptions::default().with_working_dir(&working_dir))
        .expect_err("validation should fail");

    match err {
        ConfigError::Validation(errors) => {
            let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
            assert_eq!(messages.len(), 2);
            assert!(messages.iter().any(|m| m.starts_with("toc.collapse")));
            assert!(messages
                .iter()
                .any(|m| m.starts_with("toc.toc_level") && m.contains("found 7")));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_override_is_reported() {
    let temp = TempDir::new().expect("tempdir");
    let working_dir = canonical(temp.path());

    let err = Config::load(
        LoadOptions::default()
            .with_working_dir(&working_dir)
            .with_override_path("missing.toml"),
    )
    .expect_err("missing override");

    assert!(matches!(err, ConfigError::OverrideNotFound { .. }));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let temp = TempDir::new().expect("tempdir");
    let working_dir = canonical(temp.path());

    write_file(working_dir.join(".ad-toc.toml"), "[toc\nfence_label = 1");

    let err = Config::load(LoadOptions::default().with_working_dir(&working_dir))
        .expect_err("parse failure");
    assert!(matches!(err, ConfigError::Parse { .. }));
}
