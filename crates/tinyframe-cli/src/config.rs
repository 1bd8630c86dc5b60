//! Configuration file support for the `tinyframe` CLI.
//!
//! Lookup order:
//! 1. Path given with `--config`
//! 2. `./tinyframe.toml`, when present
//! 3. Built-in defaults
//!
//! Every section and key is optional.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tinyframe_core::{DeviceFamily, Route};

pub const DEFAULT_CONFIG_FILE: &str = "tinyframe.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub log: LogConfig,
    pub routes: RoutesConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// `tracing` filter used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoutesConfig {
    pub ost: RouteConfig,
    pub swx: RouteConfig,
}

/// Publish destination override; unset keys fall back to the family default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RouteConfig {
    pub topic: Option<String>,
    pub qos: Option<u8>,
}

impl RoutesConfig {
    pub fn route(&self, family: DeviceFamily) -> Route {
        let config = match family {
            DeviceFamily::Ost => &self.ost,
            DeviceFamily::Swx => &self.swx,
        };
        let default = Route::default_for(family);
        Route {
            topic: config.topic.clone().unwrap_or(default.topic),
            qos: config.qos.unwrap_or(default.qos),
        }
    }
}

impl Config {
    /// Load `explicit` if given, else `./tinyframe.toml` if it exists, else defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let local = PathBuf::from(DEFAULT_CONFIG_FILE);
        if local.is_file() {
            return Self::load(&local);
        }
        Ok(Self::default())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("Invalid config file: {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let config: Config = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        for family in DeviceFamily::ALL {
            let route = self.routes.route(family);
            if route.topic.trim().is_empty() {
                bail!("routes.{family}.topic must not be empty");
            }
            if route.qos > 1 {
                bail!("routes.{family}.qos must be 0 or 1, got {}", route.qos);
            }
        }
        if self.log.level.trim().is_empty() {
            bail!("log.level must not be empty");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use tinyframe_core::{DeviceFamily, Route};

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.log.level, "info");
        assert_eq!(
            config.routes.route(DeviceFamily::Ost),
            Route::new("ost/decoded/data", 0)
        );
    }

    #[test]
    fn partial_route_keeps_other_defaults() {
        let config = Config::parse(
            r#"
            [routes.swx]
            qos = 1
            "#,
        )
        .unwrap();
        assert_eq!(
            config.routes.route(DeviceFamily::Swx),
            Route::new("libelium/swx/decoded/data", 1)
        );
        assert_eq!(
            config.routes.route(DeviceFamily::Ost),
            Route::default_for(DeviceFamily::Ost)
        );
    }

    #[test]
    fn full_file() {
        let config = Config::parse(
            r#"
            [log]
            level = "debug"

            [routes.ost]
            topic = "farm/ost"
            qos = 0
            "#,
        )
        .unwrap();
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.routes.route(DeviceFamily::Ost).topic, "farm/ost");
    }

    #[test]
    fn rejects_unsupported_qos() {
        let err = Config::parse("[routes.ost]\nqos = 2\n").unwrap_err();
        assert!(err.to_string().contains("qos must be 0 or 1"));
    }

    #[test]
    fn rejects_empty_topic_and_unknown_keys() {
        assert!(Config::parse("[routes.swx]\ntopic = \" \"\n").is_err());
        assert!(Config::parse("[routes.ost]\ntopik = \"x\"\n").is_err());
    }
}
