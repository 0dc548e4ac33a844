use std::{fs, path::Path, time::Duration};

use anyhow::{Context, Result};
use serde::Deserialize;

use tr_hmi_bus::TopicNames;
use tr_hmi_input::{DEFAULT_CLICK_DEBOUNCE, DEFAULT_TOUCH_SLOP, TransformableConfig};
use tr_hmi_socket::Settings;

/// The node's TOML configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub settings: Settings,
    pub topics: TopicNames,
    pub gesture: GestureSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GestureSection {
    pub touch_slop: f64,
    pub click_debounce_ms: u64,
}

impl Default for GestureSection {
    fn default() -> Self {
        Self {
            touch_slop: DEFAULT_TOUCH_SLOP,
            click_debounce_ms: DEFAULT_CLICK_DEBOUNCE.as_millis() as u64,
        }
    }
}

impl GestureSection {
    pub fn transformable_config(&self) -> TransformableConfig {
        TransformableConfig {
            touch_slop: self.touch_slop,
            click_debounce: Duration::from_millis(self.click_debounce_ms),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Reading configuration {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Parsing configuration {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.settings, Settings::default());
        assert_eq!(config.topics, TopicNames::default());
        assert_eq!(
            config.gesture.transformable_config(),
            TransformableConfig::default()
        );
    }

    #[test]
    fn partial_sections() {
        let config = Config::parse(
            r#"
[settings]
map = "lab.yaml"

[topics]
cmd_vel = "/mobile_base/cmd_vel"

[gesture]
click_debounce_ms = 250
        "#,
        )
        .unwrap();

        assert_eq!(config.settings.map, "lab.yaml");
        assert_eq!(config.settings.max_vx, 2.0);
        assert_eq!(config.topics.cmd_vel, "/mobile_base/cmd_vel");
        assert_eq!(config.topics.goal, "/tr_hmi/goal");

        let gesture = config.gesture.transformable_config();
        assert_eq!(gesture.click_debounce, Duration::from_millis(250));
        assert_eq!(gesture.touch_slop, 1.0);
    }

    #[test]
    fn unknown_sections_are_rejected() {
        assert!(Config::parse("[setting]\nmap = \"x\"").is_err());
    }

    #[test]
    fn example_configuration_parses() {
        let config = Config::parse(include_str!("../hmi.example.toml")).unwrap();
        assert_eq!(config.settings, Settings::default());
    }
}
