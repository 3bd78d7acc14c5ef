use markdown_inline_engine::{ExtensionSet, InlineOptions, InlineSyntax, SyntaxError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid paired rule for tag <{tag}>: {source}")]
    InvalidSyntax { tag: String, source: SyntaxError },
}

/// Which optional rule families are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtensionsConfig {
    pub strikethrough: bool,
    pub autolink: bool,
    pub inline_html: bool,
}

impl Default for ExtensionsConfig {
    fn default() -> Self {
        ExtensionSet::common_mark().into()
    }
}

impl From<ExtensionSet> for ExtensionsConfig {
    fn from(set: ExtensionSet) -> Self {
        Self {
            strikethrough: set.strikethrough,
            autolink: set.autolink,
            inline_html: set.inline_html,
        }
    }
}

impl From<ExtensionsConfig> for ExtensionSet {
    fn from(config: ExtensionsConfig) -> Self {
        Self {
            strikethrough: config.strikethrough,
            autolink: config.autolink,
            inline_html: config.inline_html,
        }
    }
}

/// A host tag such as `==marked==` → `<mark>`. `start` and `end` are regular
/// expressions matched at the cursor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairedConfig {
    pub start: String,
    pub end: String,
    pub tag: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub encode_html: bool,
    pub max_nesting: usize,
    /// File of `[label]: url "title"` definitions available to every document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub references: Option<PathBuf>,
    pub extensions: ExtensionsConfig,
    pub paired: Vec<PairedConfig>,
}

impl Default for Config {
    fn default() -> Self {
        let options = InlineOptions::default();
        Self {
            encode_html: options.encode_html,
            max_nesting: options.max_nesting,
            references: None,
            extensions: options.extensions.into(),
            paired: vec![],
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the references path
        config.references = config
            .references
            .map(|path| Self::expand_path(&path).unwrap_or(path));

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/markdown-inline");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Builds parser options, compiling the paired rules in file order.
    pub fn to_options(&self) -> Result<InlineOptions, ConfigError> {
        let syntaxes = self
            .paired
            .iter()
            .map(|p| {
                InlineSyntax::paired(&p.start, &p.end, p.tag.as_str()).map_err(|source| {
                    ConfigError::InvalidSyntax {
                        tag: p.tag.clone(),
                        source,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(InlineOptions {
            syntaxes,
            extensions: self.extensions.into(),
            encode_html: self.encode_html,
            max_nesting: self.max_nesting,
            ..InlineOptions::default()
        })
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
