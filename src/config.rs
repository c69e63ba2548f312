use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::domain::branch::{BranchNamingConfig, KeyCase, default_prefix_map};
use crate::domain::ticket::TicketFilter;
use crate::domain::update::DEFAULT_CHECK_INTERVAL_HOURS;
use crate::error::{AppError, AppResult};

pub const CONFIG_DIR_NAME: &str = ".baton";
const CONFIG_FILE_NAME: &str = "config.json";

pub fn config_directory() -> AppResult<PathBuf> {
    home::home_dir()
        .map(|dir| dir.join(CONFIG_DIR_NAME))
        .ok_or_else(|| {
            AppError::Configuration("could not determine the home directory".to_string())
        })
}

pub fn config_file_path() -> AppResult<PathBuf> {
    Ok(config_directory()?.join(CONFIG_FILE_NAME))
}

/// On-disk configuration. Every field has a default, so a partially written
/// file (or none at all) still loads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoredConfig {
    pub jira_base_url: Option<String>,
    pub jira_email: Option<String>,
    pub jira_token: Option<String>,
    pub project_keys: Vec<String>,
    pub ticket_statuses: Vec<String>,
    pub max_results: u32,
    pub additional_jql: Option<String>,
    pub use_branch_prefixes: bool,
    pub branch_pattern: String,
    pub branch_prefixes: BTreeMap<String, String>,
    pub ticket_key_case: String,
    pub update_check_interval_hours: i64,
    pub disable_update_check: bool,
}

impl Default for StoredConfig {
    fn default() -> Self {
        Self {
            jira_base_url: None,
            jira_email: None,
            jira_token: None,
            project_keys: Vec::new(),
            ticket_statuses: Vec::new(),
            max_results: 100,
            additional_jql: None,
            use_branch_prefixes: true,
            branch_pattern: "{type}/{ticket_key}-{summary}".to_string(),
            branch_prefixes: default_prefix_map(),
            ticket_key_case: KeyCase::Lower.as_str().to_string(),
            update_check_interval_hours: DEFAULT_CHECK_INTERVAL_HOURS,
            disable_update_check: false,
        }
    }
}

impl StoredConfig {
    pub fn load() -> AppResult<Self> {
        let path = config_file_path()?;
        match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).map_err(|err| {
                AppError::Configuration(format!(
                    "invalid config file {}: {err}; run 'baton setup' to rewrite it",
                    path.display()
                ))
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(AppError::Io(err)),
        }
    }

    pub fn save(&self) -> AppResult<()> {
        let path = config_file_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(self).map_err(|err| {
            AppError::Configuration(format!("failed to serialize config: {err}"))
        })?;
        fs::write(&path, data)?;
        restrict_permissions(&path)?;
        Ok(())
    }
}

// The config file holds the API token, so keep it owner-only.
#[cfg(unix)]
fn restrict_permissions(path: &std::path::Path) -> AppResult<()> {
    use std::os::unix::fs::PermissionsExt;
    let permissions = fs::Permissions::from_mode(0o600);
    fs::set_permissions(path, permissions)?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &std::path::Path) -> AppResult<()> {
    Ok(())
}

#[derive(Debug, Clone)]
pub struct UpdateSettings {
    pub interval: Duration,
    pub disabled: bool,
}

/// Validated, in-memory view of the configuration handed to the workflows.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub jira_base_url: Option<String>,
    pub jira_email: Option<String>,
    pub jira_token: Option<String>,
    pub naming: BranchNamingConfig,
    pub filter: TicketFilter,
    pub update: UpdateSettings,
}

impl AppConfig {
    pub fn load() -> AppResult<Self> {
        Ok(Self::from_stored(StoredConfig::load()?))
    }

    pub fn from_stored(stored: StoredConfig) -> Self {
        let naming = BranchNamingConfig {
            pattern: stored.branch_pattern,
            use_prefixes: stored.use_branch_prefixes,
            prefix_map: stored.branch_prefixes,
            key_case: KeyCase::from_str(&stored.ticket_key_case).unwrap_or(KeyCase::Lower),
        };
        let filter = TicketFilter {
            project_keys: stored.project_keys,
            statuses: stored.ticket_statuses,
            max_results: stored.max_results,
            extra_jql: stored
                .additional_jql
                .filter(|clause| !clause.trim().is_empty()),
        };
        let update = UpdateSettings {
            interval: Duration::hours(stored.update_check_interval_hours.max(0)),
            disabled: stored.disable_update_check,
        };
        Self {
            jira_base_url: stored.jira_base_url,
            jira_email: stored.jira_email,
            jira_token: stored.jira_token,
            naming,
            filter,
            update,
        }
    }
}
