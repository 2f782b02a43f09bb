//! Configuration for gitli
//!
//! Optional file at .gitli/config.toml. Everything has a default, so a
//! missing file is the same as an empty one.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// gitli configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Display settings
    pub display: DisplayConfig,
}

/// When to color list output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Defer to `git config gitli.color`
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Decide whether to color, given the value of `git config gitli.color`
    pub fn resolve(self, git_setting: Option<&str>) -> bool {
        match self {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => git_setting
                .map(|v| matches!(v.trim().to_lowercase().as_str(), "auto" | "on" | "true"))
                .unwrap_or(false),
        }
    }
}

impl std::str::FromStr for ColorMode {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(ColorMode::Auto),
            "always" | "on" | "true" => Ok(ColorMode::Always),
            "never" | "off" | "false" => Ok(ColorMode::Never),
            _ => Err(crate::Error::Config(format!("unknown color mode '{}'", s))),
        }
    }
}

impl std::fmt::Display for ColorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColorMode::Auto => write!(f, "auto"),
            ColorMode::Always => write!(f, "always"),
            ColorMode::Never => write!(f, "never"),
        }
    }
}

/// Display configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Use colors in output
    pub color: ColorMode,

    /// Column width for titles in listings
    pub title_width: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::Auto,
            title_width: 48,
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config =
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Generate a default config file with comments
    pub fn default_with_comments() -> String {
        r#"# gitli configuration

[display]
# Use colors in output: "auto" (follow `git config gitli.color`), "always", "never"
color = "auto"

# Column width for titles in listings
title_width = 48
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_commented_default_parses_to_default() {
        let config: Config = toml::from_str(&Config::default_with_comments()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[display]\ncolor = \"never\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.display.color, ColorMode::Never);
        assert_eq!(config.display.title_width, 48);
    }

    #[test]
    fn test_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[display]\ncolor = 3\n").unwrap();

        assert!(matches!(Config::load(&path), Err(crate::Error::Config(_))));
    }

    #[test]
    fn test_color_resolution() {
        assert!(ColorMode::Always.resolve(None));
        assert!(!ColorMode::Never.resolve(Some("true")));
        assert!(ColorMode::Auto.resolve(Some("On\n")));
        assert!(ColorMode::Auto.resolve(Some("auto")));
        assert!(!ColorMode::Auto.resolve(Some("false")));
        assert!(!ColorMode::Auto.resolve(None));
    }
}
