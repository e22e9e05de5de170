// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::collections::HashMap;
use std::env;

use config::{Environment, File};
use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig { level: "info".to_string() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub session_url: String,
    pub access_token: String,
    #[serde(default)]
    pub overridden_api_url: Option<String>,
    #[serde(default)]
    pub default_account_id: Option<String>,
    #[serde(default)]
    pub http_headers: HashMap<String, String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub log: LogConfig,
}

impl Settings {
    /// Load settings from defaults, an optional config file and the
    /// environment, later sources overriding earlier ones.
    pub fn new(config_path: Option<&str>) -> Result<Self, SettingsError> {
        let mut config_builder = config::Config::builder()
            .set_default("access_token", "")?
            .set_default("log.level", "info")?;

        if let Some(path) = config_path {
            config_builder = config_builder.add_source(File::with_name(path));
        }

        // e.g. `JMAP_SESSION_URL=...` overrides `session_url`,
        // `JMAP_LOG__LEVEL=debug` overrides `log.level`
        config_builder = config_builder.add_source(
            Environment::with_prefix("JMAP")
                .prefix_separator("_")
                .separator("__")
                .ignore_empty(true),
        );

        // Short aliases for the settings people set most often.
        let env_vars = [
            ("JMAP_API_URL", "overridden_api_url"),
            ("JMAP_ACCOUNT_ID", "default_account_id"),
            ("JMAP_LOG_LEVEL", "log.level"),
            ("JMAP_TIMEOUT_SECS", "timeout_secs"),
        ];

        for (env_var, config_path) in &env_vars {
            if let Ok(value) = env::var(env_var) {
                if value.is_empty() {
                    continue;
                }
                if *env_var == "JMAP_TIMEOUT_SECS" {
                    if let Ok(secs) = value.parse::<u64>() {
                        config_builder = config_builder.set_override(config_path, secs)?;
                    } else {
                        warn!("Invalid timeout value in {}: {}", env_var, value);
                    }
                } else {
                    config_builder = config_builder.set_override(config_path, value)?;
                }
            }
        }

        let settings: Settings = config_builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.session_url.trim().is_empty() {
            return Err(SettingsError::Missing("session_url"));
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to load or parse configuration: {0}")]
    LoadError(#[from] config::ConfigError),
    #[error("Missing required setting: {0}")]
    Missing(&'static str),
}
