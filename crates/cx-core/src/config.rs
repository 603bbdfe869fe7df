//! Configuration management for coursex

use crate::error::{CourseExportError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Export settings
    pub export: ExportConfig,
    /// Conversion settings
    pub convert: ConvertConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| CourseExportError::Toml(e.to_string()))
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.export.indent > 16 {
            return Err(CourseExportError::Config(format!(
                "export.indent must be at most 16, got {}",
                self.export.indent
            )));
        }
        Ok(())
    }
}

/// Export-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Export unpublished units into `drafts/`
    pub include_drafts: bool,
    /// Hand asset paths to the asset store
    pub include_assets: bool,
    /// Write indented XML
    pub pretty_xml: bool,
    /// Indent width for pretty XML
    pub indent: usize,
}

impl ExportConfig {
    /// Indent width to render with, if pretty output is on
    pub fn xml_indent(&self) -> Option<usize> {
        self.pretty_xml.then_some(self.indent)
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            include_drafts: true,
            include_assets: true,
            pretty_xml: false,
            indent: 2,
        }
    }
}

/// Conversion-related configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Replace an existing course directory in the conversion target
    pub overwrite: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.export.include_drafts);
        assert!(config.export.include_assets);
        assert_eq!(config.export.xml_indent(), None);
        assert!(!config.convert.overwrite);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("[export]"));
        assert!(toml.contains("[convert]"));

        let config2: Config = toml::from_str(&toml).unwrap();
        assert_eq!(config.export.indent, config2.export.indent);
    }

    #[test]
    fn test_partial_config() {
        let config: Config = toml::from_str("[export]\npretty_xml = true\n").unwrap();
        assert_eq!(config.export.xml_indent(), Some(2));
        assert!(config.export.include_drafts);
    }

    #[test]
    fn test_load_rejects_huge_indent() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[export]\nindent = 40\n").unwrap();

        let result = Config::load(&path);
        assert!(matches!(result, Err(CourseExportError::Config(_))));
    }
}
