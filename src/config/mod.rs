use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use dropdown_tui::theme::ThemeOverrides;
use dropdown_tui::DropdownOption;

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionEntry {
    pub title: String,
    pub value: String,
}

impl OptionEntry {
    /// Parse a `TITLE=VALUE` command line option. A bare `TITLE` uses the
    /// title as its value.
    pub fn parse(spec: &str) -> Result<Self, ConfigError> {
        let (title, value) = spec.split_once('=').unwrap_or((spec, spec));
        let title = title.trim();
        if title.is_empty() {
            return Err(ConfigError::InvalidOption(spec.to_string()));
        }
        Ok(Self {
            title: title.to_string(),
            value: value.trim().to_string(),
        })
    }
}

impl From<OptionEntry> for DropdownOption<String> {
    fn from(entry: OptionEntry) -> Self {
        DropdownOption::new(entry.title, entry.value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Trigger title before anything is chosen
    #[serde(default = "default_label")]
    pub label: String,

    /// Style tokens for the trigger, e.g. "bold fg:yellow"
    #[serde(default)]
    pub style: String,

    #[serde(default)]
    pub options: Vec<OptionEntry>,

    /// Color overrides
    #[serde(default)]
    pub theme: ThemeOverrides,
}

fn default_label() -> String {
    "Select an option".to_string()
}

impl Default for DemoConfig {
    fn default() -> Self {
        let options = [("Apple", "apple"), ("Banana", "banana"), ("Cherry", "cherry")]
            .into_iter()
            .map(|(title, value)| OptionEntry {
                title: title.to_string(),
                value: value.to_string(),
            })
            .collect();

        Self {
            label: default_label(),
            style: String::new(),
            options,
            theme: ThemeOverrides::default(),
        }
    }
}

impl DemoConfig {
    /// Get the config file path
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("dropdown-tui");

        if let Err(e) = std::fs::create_dir_all(&config_dir) {
            tracing::warn!("Could not create config directory: {}", e);
        }

        Ok(config_dir.join("config.toml"))
    }

    /// Load an explicitly requested config. Any failure is an error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the default config file, or create it
    pub fn load() -> Self {
        let path = match Self::config_path() {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!("{}, using defaults", e);
                return Self::default();
            }
        };

        if path.exists() {
            match Self::load_from(&path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("{}, using defaults", e);
                    return Self::default();
                }
            }
        }

        let config = Self::default();
        if let Err(e) = config.save_to(&path) {
            tracing::warn!("Could not write default config: {}", e);
        }
        config
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        tracing::debug!("Wrote config to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serialization() {
        let config = DemoConfig {
            label: "Fruit".to_string(),
            style: "bold fg:yellow".to_string(),
            options: vec![OptionEntry {
                title: "Kiwi".to_string(),
                value: "kiwi".to_string(),
            }],
            theme: ThemeOverrides {
                accent: Some("#ff8800".to_string()),
                ..Default::default()
            },
        };

        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: DemoConfig = toml::from_str(&serialized).unwrap();

        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: DemoConfig = toml::from_str(
            r#"
            [[options]]
            title = "One"
            value = "1"
            "#,
        )
        .unwrap();

        assert_eq!(config.label, "Select an option");
        assert_eq!(config.style, "");
        assert_eq!(config.options.len(), 1);
        assert_eq!(config.theme, ThemeOverrides::default());
    }

    #[test]
    fn test_option_spec_parsing() {
        let entry = OptionEntry::parse("Blue = #0000ff").unwrap();
        assert_eq!(entry.title, "Blue");
        assert_eq!(entry.value, "#0000ff");

        let bare = OptionEntry::parse("Plain").unwrap();
        assert_eq!(bare.value, "Plain");

        // Only the first '=' splits
        let eq = OptionEntry::parse("Sum=a=b").unwrap();
        assert_eq!(eq.value, "a=b");

        assert!(matches!(OptionEntry::parse("=x"), Err(ConfigError::InvalidOption(_))));
        assert!(matches!(OptionEntry::parse(""), Err(ConfigError::InvalidOption(_))));
    }

    #[test]
    fn test_load_from_reports_errors() {
        let dir = std::env::temp_dir().join(format!("dropdown-tui-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let missing = dir.join("missing.toml");
        assert!(matches!(DemoConfig::load_from(&missing), Err(ConfigError::Read { .. })));

        let broken = dir.join("broken.toml");
        std::fs::write(&broken, "label = [").unwrap();
        assert!(matches!(DemoConfig::load_from(&broken), Err(ConfigError::Parse { .. })));

        let good = dir.join("good.toml");
        DemoConfig::default().save_to(&good).unwrap();
        assert_eq!(DemoConfig::load_from(&good).unwrap(), DemoConfig::default());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
