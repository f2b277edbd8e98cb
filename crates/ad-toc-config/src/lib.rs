//! Configuration primitives and loader for the ad-toc annotator.
//!
//! Settings resolve through a precedence stack:
//! override file → working directory → git root → built-in defaults.
//! TOML layers use a `[toc]` table; an override ending in `.json` is read as
//! the host application's persisted key/value object. Raw values, including
//! the host's `"none"` sentinel, are normalised into [`TocSettings`] so the
//! TOC stages never look at strings to decide whether a line is enabled.

pub mod locale;
pub mod settings;

use std::env;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

pub use locale::{Locale, TextKey};
pub use settings::{BlockStyle, CollapseState, MetadataLine, TocSettings, MAX_HEADING_LEVEL};

const CONFIG_FILE_NAME: &str = ".ad-toc.toml";

/// Sentinel the host stores in place of an absent metadata value.
const NONE_SENTINEL: &str = "none";

/// Complete configuration resolved from defaults and on-disk overrides.
#[derive(Clone, Debug)]
pub struct Config {
    pub toc: TocSettings,
    pub sources: ConfigSources,
}

/// Provenance information for resolved configuration.
#[derive(Clone, Debug)]
pub struct ConfigSources {
    pub working_directory: PathBuf,
    pub layers: Vec<ConfigSource>,
}

/// Specific layer of configuration (default/git/local/override).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigSource {
    pub kind: ConfigSourceKind,
    pub path: Option<PathBuf>,
}

impl ConfigSource {
    fn builtin() -> Self {
        ConfigSource {
            kind: ConfigSourceKind::Default,
            path: None,
        }
    }

    fn for_file(kind: ConfigSourceKind, path: PathBuf) -> Self {
        ConfigSource {
            kind,
            path: Some(path),
        }
    }

    fn describe(&self) -> String {
        match (&self.kind, &self.path) {
            (ConfigSourceKind::Default, _) => "built-in defaults".to_owned(),
            (kind, Some(path)) => format!("{} at {}", kind, path.display()),
            (kind, None) => kind.to_string(),
        }
    }
}

/// Kinds of configuration sources, ordered from lowest to highest precedence.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConfigSourceKind {
    Default,
    GitRoot,
    Local,
    Override,
    HostData,
}

impl fmt::Display for ConfigSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConfigSourceKind::Default => "defaults",
            ConfigSourceKind::GitRoot => "git-root config",
            ConfigSourceKind::Local => "local config",
            ConfigSourceKind::Override => "override config",
            ConfigSourceKind::HostData => "host data",
        };
        f.write_str(label)
    }
}

/// Loader options, typically supplied by the CLI layer.
#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub override_path: Option<PathBuf>,
    pub working_dir: Option<PathBuf>,
}

impl LoadOptions {
    pub fn with_override_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.override_path = Some(path.into());
        self
    }

    pub fn with_working_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(path.into());
        self
    }
}

/// Errors surfaced while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to resolve working directory {attempted}: {source}")]
    WorkingDirectory {
        attempted: PathBuf,
        source: io::Error,
    },
    #[error("override config {path} not found")]
    OverrideNotFound { path: PathBuf },
    #[error("failed to read config {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("failed to parse host data {origin}: {source}")]
    HostData {
        origin: String,
        source: serde_json::Error,
    },
    #[error("configuration validation failed:\n{0}")]
    Validation(ConfigValidationErrors),
}

impl Config {
    /// Loads configuration using the precedence rules and returns typed settings.
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let working_dir = resolve_working_dir(options.working_dir)?;
        let override_path = options
            .override_path
            .map(|path| make_absolute(&path, &working_dir));

        if let Some(path) = &override_path {
            if !path.exists() {
                return Err(ConfigError::OverrideNotFound { path: path.clone() });
            }
        }

        let default_source = ConfigSource::builtin();
        let mut merged = defaults_layer(&default_source);
        let mut source_layers = vec![default_source];

        let git_config_path = find_git_root(&working_dir).map(|root| root.join(CONFIG_FILE_NAME));
        let local_config_path = working_dir.join(CONFIG_FILE_NAME);

        if let Some(path) = git_config_path.as_ref() {
            if path.exists() && Some(path) != override_path.as_ref() && path != &local_config_path {
                let source = ConfigSource::for_file(ConfigSourceKind::GitRoot, path.clone());
                merged.merge(load_layer(path, &source)?);
                source_layers.push(source);
            }
        }

        if local_config_path.exists() && Some(&local_config_path) != override_path.as_ref() {
            let source = ConfigSource::for_file(ConfigSourceKind::Local, local_config_path.clone());
            merged.merge(load_layer(&local_config_path, &source)?);
            source_layers.push(source);
        }

        if let Some(path) = override_path {
            let kind = if is_host_data(&path) {
                ConfigSourceKind::HostData
            } else {
                ConfigSourceKind::Override
            };
            let source = ConfigSource::for_file(kind, path.clone());
            merged.merge(load_layer(&path, &source)?);
            source_layers.push(source);
        }

        let toc = merged.finalize().map_err(ConfigError::Validation)?;
        Ok(Config {
            toc,
            sources: ConfigSources {
                working_directory: working_dir,
                layers: source_layers,
            },
        })
    }

    /// Resolves settings from the host's persisted key/value object merged
    /// over the built-in defaults, without touching the filesystem.
    pub fn from_host_data(contents: &str) -> Result<Self, ConfigError> {
        let default_source = ConfigSource::builtin();
        let host_source = ConfigSource {
            kind: ConfigSourceKind::HostData,
            path: None,
        };

        let mut merged = defaults_layer(&default_source);
        let raw: RawToc =
            serde_json::from_str(contents).map_err(|source| ConfigError::HostData {
                origin: "<inline>".to_owned(),
                source,
            })?;
        merged.merge(raw.into_partial(&host_source));

        let toc = merged.finalize().map_err(ConfigError::Validation)?;
        Ok(Config {
            toc,
            sources: ConfigSources {
                working_directory: PathBuf::from("."),
                layers: vec![default_source, host_source],
            },
        })
    }
}

fn resolve_working_dir(override_dir: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
    match override_dir {
        Some(path) => fs::canonicalize(&path).map_err(|source| ConfigError::WorkingDirectory {
            attempted: path,
            source,
        }),
        None => env::current_dir().map_err(|source| ConfigError::WorkingDirectory {
            attempted: PathBuf::from("."),
            source,
        }),
    }
}

fn make_absolute(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

fn is_host_data(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn load_layer(path: &Path, source: &ConfigSource) -> Result<TocPartial, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|err| ConfigError::Io {
        path: path.into(),
        source: err,
    })?;

    if is_host_data(path) {
        let raw: RawToc =
            serde_json::from_str(&contents).map_err(|err| ConfigError::HostData {
                origin: path.display().to_string(),
                source: err,
            })?;
        return Ok(raw.into_partial(source));
    }

    let raw: RawConfig = toml::from_str(&contents).map_err(|err| ConfigError::Parse {
        path: path.into(),
        source: err,
    })?;
    Ok(raw
        .toc
        .map(|toc| toc.into_partial(source))
        .unwrap_or_default())
}

fn defaults_layer(source: &ConfigSource) -> TocPartial {
    let defaults = TocSettings::default();
    let located = |value| Some(Located::new(value, source.clone()));

    TocPartial {
        head_marker: located(defaults.head_marker),
        tail_marker: located(defaults.tail_marker),
        enable_code_block: Some(Located::new(defaults.style.is_fenced(), source.clone())),
        fence_label: located(defaults.fence_label),
        enable_title: Some(Located::new(defaults.title.enabled, source.clone())),
        title: located(defaults.title.value.unwrap_or_default()),
        enable_color: Some(Located::new(defaults.color.enabled, source.clone())),
        color: located(defaults.color.value.unwrap_or_default()),
        enable_collapse: Some(Located::new(defaults.collapse.enabled, source.clone())),
        collapse: located(
            defaults
                .collapse
                .value
                .map(|state| state.as_str().to_owned())
                .unwrap_or_else(|| NONE_SENTINEL.to_owned()),
        ),
        toc_level: Some(Located::new(i64::from(defaults.max_level), source.clone())),
    }
}

fn find_git_root(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);
    while let Some(dir) = current {
        if dir.join(".git").exists() {
            return Some(dir.to_path_buf());
        }
        current = dir.parent();
    }
    None
}

#[derive(Clone, Debug)]
struct Located<T> {
    value: T,
    source: ConfigSource,
}

impl<T> Located<T> {
    fn new(value: T, source: ConfigSource) -> Self {
        Located { value, source }
    }
}

#[derive(Clone, Debug, Default)]
struct TocPartial {
    head_marker: Option<Located<String>>,
    tail_marker: Option<Located<String>>,
    enable_code_block: Option<Located<bool>>,
    fence_label: Option<Located<String>>,
    enable_title: Option<Located<bool>>,
    title: Option<Located<String>>,
    enable_color: Option<Located<bool>>,
    color: Option<Located<String>>,
    enable_collapse: Option<Located<bool>>,
    collapse: Option<Located<String>>,
    toc_level: Option<Located<i64>>,
}

impl TocPartial {
    fn merge(&mut self, other: TocPartial) {
        fn take<T>(slot: &mut Option<T>, incoming: Option<T>) {
            if incoming.is_some() {
                *slot = incoming;
            }
        }

        take(&mut self.head_marker, other.head_marker);
        take(&mut self.tail_marker, other.tail_marker);
        take(&mut self.enable_code_block, other.enable_code_block);
        take(&mut self.fence_label, other.fence_label);
        take(&mut self.enable_title, other.enable_title);
        take(&mut self.title, other.title);
        take(&mut self.enable_color, other.enable_color);
        take(&mut self.color, other.color);
        take(&mut self.enable_collapse, other.enable_collapse);
        take(&mut self.collapse, other.collapse);
        take(&mut self.toc_level, other.toc_level);
    }

    fn finalize(self) -> Result<TocSettings, ConfigValidationErrors> {
        let defaults = TocSettings::default();
        let mut errors = Vec::new();

        let collapse_value = match self.collapse {
            Some(located) => parse_collapse(&located, &mut errors),
            None => defaults.collapse.value,
        };

        let max_level = match self.toc_level {
            Some(located) => match u8::try_from(located.value) {
                Ok(level) if (1..=MAX_HEADING_LEVEL).contains(&level) => level,
                _ => {
                    errors.push(
                        ConfigValidationError::new(
                            Some(located.source),
                            format!(
                                "must be between 1 and {MAX_HEADING_LEVEL} (found {})",
                                located.value
                            ),
                        )
                        .with_context("toc.toc_level"),
                    );
                    defaults.max_level
                }
            },
            None => defaults.max_level,
        };

        if !errors.is_empty() {
            return Err(ConfigValidationErrors(errors));
        }

        Ok(TocSettings {
            head_marker: value_or(self.head_marker, defaults.head_marker),
            tail_marker: value_or(self.tail_marker, defaults.tail_marker),
            style: BlockStyle::from_code_block_flag(value_or(
                self.enable_code_block,
                defaults.style.is_fenced(),
            )),
            fence_label: value_or(self.fence_label, defaults.fence_label),
            title: MetadataLine {
                enabled: value_or(self.enable_title, defaults.title.enabled),
                value: self
                    .title
                    .map(|located| optional_text(located.value))
                    .unwrap_or(defaults.title.value),
            },
            color: MetadataLine {
                enabled: value_or(self.enable_color, defaults.color.enabled),
                value: self
                    .color
                    .map(|located| optional_text(located.value))
                    .unwrap_or(defaults.color.value),
            },
            collapse: MetadataLine {
                enabled: value_or(self.enable_collapse, defaults.collapse.enabled),
                value: collapse_value,
            },
            max_level,
        })
    }
}

fn value_or<T>(located: Option<Located<T>>, fallback: T) -> T {
    located.map(|located| located.value).unwrap_or(fallback)
}

/// Blank values and the `"none"` sentinel both mean "no value".
fn optional_text(raw: String) -> Option<String> {
    if raw == NONE_SENTINEL || raw.trim().is_empty() {
        None
    } else {
        Some(raw)
    }
}

fn parse_collapse(
    located: &Located<String>,
    errors: &mut Vec<ConfigValidationError>,
) -> Option<CollapseState> {
    let raw = located.value.trim();
    if raw == NONE_SENTINEL {
        return None;
    }
    match raw.parse::<CollapseState>() {
        Ok(state) => Some(state),
        Err(()) => {
            errors.push(
                ConfigValidationError::new(
                    Some(located.source.clone()),
                    format!("unknown collapse state '{raw}' (expected none, open or close)"),
                )
                .with_context("toc.collapse"),
            );
            None
        }
    }
}

/// Container for validation failures, formatted as a bullet list.
#[derive(Debug)]
pub struct ConfigValidationErrors(pub Vec<ConfigValidationError>);

impl fmt::Display for ConfigValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, err) in self.0.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "- {err}")?;
        }
        Ok(())
    }
}

impl ConfigValidationErrors {
    pub fn iter(&self) -> impl Iterator<Item = &ConfigValidationError> {
        self.0.iter()
    }
}

/// Validation failure with optional provenance.
#[derive(Clone, Debug)]
pub struct ConfigValidationError {
    pub source: Option<ConfigSource>,
    pub message: String,
    pub context: Option<String>,
}

impl ConfigValidationError {
    fn new(source: Option<ConfigSource>, message: String) -> Self {
        ConfigValidationError {
            source,
            message,
            context: None,
        }
    }

    fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(context) = &self.context {
            write!(f, "{}: {}", context, self.message)?;
        } else {
            write!(f, "{}", self.message)?;
        }
        if let Some(source) = &self.source {
            write!(f, " ({})", source.describe())?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    toc: Option<RawToc>,
}

/// Field names follow the TOML convention; the aliases are the keys the host
/// application persists, so its data file deserializes into the same shape.
#[derive(Debug, Default, Deserialize)]
struct RawToc {
    #[serde(default, alias = "headNoadTocTip")]
    head_marker: Option<String>,
    #[serde(default, alias = "tailNoadTocTip")]
    tail_marker: Option<String>,
    #[serde(default, alias = "enableCodeBlock")]
    enable_code_block: Option<bool>,
    #[serde(default, alias = "codeBlockTitle")]
    fence_label: Option<String>,
    #[serde(default, alias = "enableTitleContent")]
    enable_title: Option<bool>,
    #[serde(default, alias = "titleContent")]
    title: Option<String>,
    #[serde(default, alias = "enableColorContent")]
    enable_color: Option<bool>,
    #[serde(default, alias = "colorContent")]
    color: Option<String>,
    #[serde(default, alias = "enableCollapseContent")]
    enable_collapse: Option<bool>,
    #[serde(default, alias = "collapseContent")]
    collapse: Option<String>,
    #[serde(default, alias = "tocLevel")]
    toc_level: Option<i64>,
}

impl RawToc {
    fn into_partial(self, source: &ConfigSource) -> TocPartial {
        let locate = |value| Located::new(value, source.clone());
        TocPartial {
            head_marker: self.head_marker.map(locate),
            tail_marker: self.tail_marker.map(locate),
            enable_code_block: self
                .enable_code_block
                .map(|value| Located::new(value, source.clone())),
            fence_label: self.fence_label.map(locate),
            enable_title: self
                .enable_title
                .map(|value| Located::new(value, source.clone())),
            title: self.title.map(locate),
            enable_color: self
                .enable_color
                .map(|value| Located::new(value, source.clone())),
            color: self.color.map(locate),
            enable_collapse: self
                .enable_collapse
                .map(|value| Located::new(value, source.clone())),
            collapse: self.collapse.map(locate),
            toc_level: self
                .toc_level
                .map(|value| Located::new(value, source.clone())),
        }
    }
}
