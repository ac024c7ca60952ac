//! Configuration handling for the TUI

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the draft file location
pub const DRAFT_PATH_ENV: &str = "ACH_CONTRACT_DRAFT_PATH";
/// Environment variable overriding the outbox directory
pub const OUTBOX_DIR_ENV: &str = "ACH_CONTRACT_OUTBOX_DIR";

const DEFAULT_COMPANY_NAME: &str = "your company";
const DRAFT_FILE_NAME: &str = "reimbursement_account_draft.json";
const OUTBOX_DIR_NAME: &str = "outbox";
const LOG_FILE_NAME: &str = "ach-contract-tui.log";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct TuiConfig {
    /// Company shown in the ownership questions
    pub company_name: Option<String>,
    /// Draft file location
    pub draft_path: Option<PathBuf>,
    /// Directory receiving submitted requests
    pub outbox_dir: Option<PathBuf>,
    /// Log file location
    pub log_path: Option<PathBuf>,
}

/// Concrete file locations after defaults and overrides are applied
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPaths {
    pub draft: PathBuf,
    pub outbox: PathBuf,
    pub log: PathBuf,
}

impl TuiConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "expensify", "ach-contract-tui")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    fn data_dir() -> PathBuf {
        Self::project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }

    /// Load configuration, writing the defaults out on first run, then apply
    /// environment overrides
    pub fn load_or_create() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if !path.exists() => {
                let config = Self::default();
                config.save()?;
                config
            }
            _ => Self::load()?,
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            self.save_to(&path)?;
        }
        Ok(())
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config {}", path.display()))
    }

    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup(DRAFT_PATH_ENV).filter(|v| !v.is_empty()) {
            self.draft_path = Some(PathBuf::from(path));
        }
        if let Some(dir) = lookup(OUTBOX_DIR_ENV).filter(|v| !v.is_empty()) {
            self.outbox_dir = Some(PathBuf::from(dir));
        }
    }

    pub fn company_name(&self) -> &str {
        self.company_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(DEFAULT_COMPANY_NAME)
    }

    pub fn paths(&self) -> ResolvedPaths {
        self.paths_in(&Self::data_dir())
    }

    fn paths_in(&self, data_dir: &Path) -> ResolvedPaths {
        ResolvedPaths {
            draft: self
                .draft_path
                .clone()
                .unwrap_or_else(|| data_dir.join(DRAFT_FILE_NAME)),
            outbox: self
                .outbox_dir
                .clone()
                .unwrap_or_else(|| data_dir.join(OUTBOX_DIR_NAME)),
            log: self
                .log_path
                .clone()
                .unwrap_or_else(|| data_dir.join(LOG_FILE_NAME)),
        }
    }
}
