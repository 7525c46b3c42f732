//! Suite configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{DataError, DataResult};
use crate::record::Credentials;
use crate::store::{LOGIN_SHEET, SEARCH_SHEET};

/// Suite configuration, resolved once at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Where the test data lives
    pub data: DataConfig,

    /// Application under test and browser projects
    pub target: TargetConfig,

    /// Fallback credentials for flows that log in before the step under test
    pub credentials: Credentials,
}

/// Test data source configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Path to the workbook
    pub workbook: PathBuf,

    pub login_sheet: String,

    pub search_sheet: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            workbook: PathBuf::from("testData/TestData.xlsx"),
            login_sheet: LOGIN_SHEET.to_string(),
            search_sheet: SEARCH_SHEET.to_string(),
        }
    }
}

/// Target application and runner settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    pub base_url: String,

    /// Browser projects; every run executes once per browser
    pub browsers: Vec<Browser>,

    pub headless: bool,

    /// Retries per failed run
    pub retries: u32,

    /// Per-run timeout
    pub timeout_ms: u64,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            base_url: "https://opensource-demo.orangehrmlive.com/".to_string(),
            browsers: vec![Browser::Chromium, Browser::Firefox, Browser::Webkit],
            headless: true,
            retries: 1,
            timeout_ms: 30_000,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Browser {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl Browser {
    pub fn as_str(&self) -> &'static str {
        match self {
            Browser::Chromium => "chromium",
            Browser::Firefox => "firefox",
            Browser::Webkit => "webkit",
        }
    }
}

impl std::fmt::Display for Browser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            target: TargetConfig::default(),
            credentials: Credentials::new("Admin", "admin123"),
        }
    }
}

impl SuiteConfig {
    /// Load configuration from file; a missing file yields the defaults
    pub fn load(path: &Path) -> DataResult<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = toml::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> DataResult<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| DataError::Config(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> DataResult<()> {
        if self.data.login_sheet.is_empty() || self.data.search_sheet.is_empty() {
            return Err(DataError::Config("sheet names must not be empty".to_string()));
        }
        if self.target.browsers.is_empty() {
            return Err(DataError::Config("at least one browser is required".to_string()));
        }
        Ok(())
    }

    /// Replace the default credentials with non-empty overrides
    pub fn with_credentials(mut self, username: Option<String>, password: Option<String>) -> Self {
        if let Some(username) = username.filter(|u| !u.is_empty()) {
            self.credentials.username = username;
        }
        if let Some(password) = password.filter(|p| !p.is_empty()) {
            self.credentials.password = password;
        }
        self
    }

    /// Pick each supplied non-empty field, else the configured default
    pub fn resolve_credentials(&self, supplied: Option<&Credentials>) -> Credentials {
        let pick = |value: Option<&String>, fallback: &String| {
            value.filter(|v| !v.is_empty()).unwrap_or(fallback).clone()
        };

        Credentials {
            username: pick(supplied.map(|c| &c.username), &self.credentials.username),
            password: pick(supplied.map(|c| &c.password), &self.credentials.password),
        }
    }
}
