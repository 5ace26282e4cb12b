//! Configuration management for mdpress.
//!
//! Parses `mdpress.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! `site.base_path` supports environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

mod expand;

use serde::Deserialize;
use std::path::{Component, Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the URL prefix pages are served under.
    pub base_path: Option<String>,
    /// Override markdown content directory.
    pub content_dir: Option<PathBuf>,
    /// Override static asset directory.
    pub static_dir: Option<PathBuf>,
    /// Override output directory.
    pub output_dir: Option<PathBuf>,
    /// Override page template path.
    pub template: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mdpress.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site configuration.
    pub site: SiteConfig,
    /// Path configuration (relative strings from TOML).
    paths: PathsConfigRaw,

    /// Resolved path configuration (set after loading).
    #[serde(skip)]
    pub paths_resolved: PathsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Site configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// URL prefix substituted for root-relative `href="/` and `src="/`.
    pub base_path: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_path: "/".to_owned(),
        }
    }
}

/// Raw path configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct PathsConfigRaw {
    content_dir: Option<String>,
    static_dir: Option<String>,
    output_dir: Option<String>,
    template: Option<String>,
}

/// Resolved path configuration with absolute paths.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PathsConfig {
    /// Markdown sources, mirrored into the output directory.
    pub content_dir: PathBuf,
    /// Static assets, copied verbatim into the output directory.
    pub static_dir: PathBuf,
    /// Generated site. Wiped before every build.
    pub output_dir: PathBuf,
    /// HTML page template with `{{ Title }}` and `{{ Content }}` placeholders.
    pub template: PathBuf,
}

impl PathsConfig {
    fn with_base(base: &Path) -> Self {
        Self {
            content_dir: base.join("content"),
            static_dir: base.join("static"),
            output_dir: base.join("public"),
            template: base.join("template.html"),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.base_path`").
        field: String,
        /// Error message (e.g., "${`BASE_PATH`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mdpress.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values. The final
    /// configuration is validated.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    ///
    /// Relative path overrides resolve against the current working directory.
    fn apply_cli_settings(&mut self, settings: &CliSettings) -> Result<(), ConfigError> {
        if let Some(base_path) = &settings.base_path {
            self.site.base_path.clone_from(base_path);
        }
        let paths = &mut self.paths_resolved;
        for (target, value) in [
            (&mut paths.content_dir, &settings.content_dir),
            (&mut paths.static_dir, &settings.static_dir),
            (&mut paths.output_dir, &settings.output_dir),
            (&mut paths.template, &settings.template),
        ] {
            if let Some(path) = value {
                *target = std::path::absolute(path)?;
            }
        }
        Ok(())
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_site()?;
        self.validate_paths()?;
        Ok(())
    }

    fn validate_site(&self) -> Result<(), ConfigError> {
        let base_path = &self.site.base_path;
        if base_path.is_empty() {
            return Err(ConfigError::Validation(
                "site.base_path cannot be empty".to_owned(),
            ));
        }
        if !base_path.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "site.base_path must start with '/', got {base_path:?}"
            )));
        }
        Ok(())
    }

    /// The output directory is deleted before every build, so it must not
    /// overlap any of the inputs.
    fn validate_paths(&self) -> Result<(), ConfigError> {
        let paths = &self.paths_resolved;
        let output_dir = normalize_path(&paths.output_dir)?;
        for (name, input) in [
            ("paths.content_dir", &paths.content_dir),
            ("paths.static_dir", &paths.static_dir),
        ] {
            let input = normalize_path(input)?;
            if input.starts_with(&output_dir) || output_dir.starts_with(&input) {
                return Err(ConfigError::Validation(format!(
                    "paths.output_dir ({}) must not overlap {name} ({})",
                    output_dir.display(),
                    input.display()
                )));
            }
        }
        Ok(())
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteConfig::default(),
            paths: PathsConfigRaw::default(),
            paths_resolved: PathsConfig::with_base(base),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.site.base_path = expand::expand_env(&config.site.base_path, "site.base_path")?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let defaults = PathsConfig::with_base(config_dir);
        let resolve = |path: Option<&str>, default: PathBuf| match path {
            Some(path) => config_dir.join(path),
            None => default,
        };

        self.paths_resolved = PathsConfig {
            content_dir: resolve(self.paths.content_dir.as_deref(), defaults.content_dir),
            static_dir: resolve(self.paths.static_dir.as_deref(), defaults.static_dir),
            output_dir: resolve(self.paths.output_dir.as_deref(), defaults.output_dir),
            template: resolve(self.paths.template.as_deref(), defaults.template),
        };
    }
}

/// Make `path` absolute and fold `.` and `..` components lexically.
///
/// Symlinks are not resolved; the path does not need to exist.
fn normalize_path(path: &Path) -> Result<PathBuf, ConfigError> {
    let mut normalized = PathBuf::new();
    for component in std::path::absolute(path)?.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    Ok(normalized)
}
