use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub date_format: DateFormat,
    pub log: LogConfig,
    pub git: GitConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateFormat {
    #[default]
    Relative,
    Iso,
    Local,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    pub default_remote: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            default_remote: "origin".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        Self::parse(&content)
    }

    pub fn config_path() -> PathBuf {
        #[cfg(windows)]
        {
            let appdata = std::env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("branchview").join("config.toml")
        }

        #[cfg(not(windows))]
        {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home)
                .join(".config")
                .join("branchview")
                .join("config.toml")
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.date_format, DateFormat::Relative);
        assert_eq!(config.log.level, "info");
        assert!(config.log.file.is_none());
        assert_eq!(config.git.default_remote, "origin");
    }

    #[test]
    fn parses_sections() {
        let config = Config::parse(
            r#"
date_format = "iso"

[log]
level = "branchview=debug"
file = "/tmp/branchview.log"

[git]
default_remote = "upstream"
"#,
        )
        .unwrap();
        assert_eq!(config.date_format, DateFormat::Iso);
        assert_eq!(config.log.level, "branchview=debug");
        assert_eq!(config.log.file, Some(PathBuf::from("/tmp/branchview.log")));
        assert_eq!(config.git.default_remote, "upstream");
    }

    #[test]
    fn unknown_date_format_is_a_config_error() {
        let err = Config::parse("date_format = \"fancy\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
