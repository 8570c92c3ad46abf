use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::client::AskOptions;
use crate::i18n::Language;
use crate::mode::ChatMode;

pub const DEFAULT_CHECK_ENDPOINT: &str = "http://localhost:8001/chat";
pub const DEFAULT_SUGGEST_ENDPOINT: &str = "http://localhost:8000/chat";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_response: Option<bool>,
    #[serde(default)]
    pub check: EndpointConfig,
    #[serde(default)]
    pub suggest: EndpointConfig,
}

impl Config {
    pub fn new() -> Self {
        Self {
            language: Some(Language::French.code().to_string()),
            ..Self::default()
        }
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    /// Read a config file; a missing file means defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let config_content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_content)
            .map_err(|e| anyhow!("Invalid config file {:?}: {}", path, e))?;
        Ok(config)
    }

    /// Like `load_from`, but a broken file is logged and replaced by defaults
    pub fn load_or_default(path: &Path) -> Self {
        Self::load_from(path).unwrap_or_else(|e| {
            warn!("{e}; using default settings");
            Self::new()
        })
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config_content = serde_json::to_string_pretty(self)?;
        fs::write(path, config_content)?;
        Ok(())
    }

    pub fn save_language(path: &Path, language: Language) -> Result<()> {
        let mut config = Self::load_or_default(path);
        config.language = Some(language.code().to_string());
        config.save_to(path)
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("parlons").join("config.json"))
    }

    pub fn language(&self) -> Language {
        self.language
            .as_deref()
            .and_then(Language::from_code)
            .unwrap_or_default()
    }

    fn mode_config(&self, mode: ChatMode) -> &EndpointConfig {
        match mode {
            ChatMode::Check => &self.check,
            ChatMode::Suggest => &self.suggest,
        }
    }

    pub fn endpoint(&self, mode: ChatMode) -> String {
        self.mode_config(mode).endpoint.clone().unwrap_or_else(|| {
            match mode {
                ChatMode::Check => DEFAULT_CHECK_ENDPOINT,
                ChatMode::Suggest => DEFAULT_SUGGEST_ENDPOINT,
            }
            .to_string()
        })
    }

    pub fn style(&self, mode: ChatMode) -> String {
        self.mode_config(mode).style.clone().unwrap_or_else(|| {
            match mode {
                ChatMode::Check => "formel",
                ChatMode::Suggest => "concise",
            }
            .to_string()
        })
    }

    pub fn set_endpoint(&mut self, mode: ChatMode, endpoint: &str) {
        match mode {
            ChatMode::Check => self.check.endpoint = Some(endpoint.to_string()),
            ChatMode::Suggest => self.suggest.endpoint = Some(endpoint.to_string()),
        }
    }

    /// Pass-through request fields for one mode
    pub fn ask_options(&self, mode: ChatMode) -> AskOptions {
        AskOptions {
            style: self.style(mode),
            session_id: self.session_id.clone().unwrap_or_else(|| "default".to_string()),
            short_response: self.short_response.unwrap_or(false),
        }
    }
}
