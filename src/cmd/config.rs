use clap::{Args, Subcommand};

use crate::config::{StoredConfig, config_file_path};
use crate::error::AppResult;

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Show the stored configuration (secrets masked).
    Show,
}

pub fn run(command: ConfigCommand) -> AppResult<()> {
    match command {
        ConfigCommand::Show => run_show(),
    }
}

fn run_show() -> AppResult<()> {
    let cfg = StoredConfig::load()?;
    let path = config_file_path()?;

    println!("Configuration file: {}", path.display());
    println!("Jira base URL: {}", display_value(&cfg.jira_base_url));
    println!("Jira email: {}", display_value(&cfg.jira_email));
    println!("Jira API token: {}", mask_secret(&cfg.jira_token));
    println!("Project keys: {}", display_list(&cfg.project_keys));
    println!("Ticket statuses: {}", display_list(&cfg.ticket_statuses));
    println!("Max results: {}", cfg.max_results);
    println!(
        "Additional JQL: {}",
        display_value(&cfg.additional_jql)
    );
    println!(
        "Branch prefixes: {}",
        if cfg.use_branch_prefixes {
            "enabled"
        } else {
            "disabled"
        }
    );
    println!("Branch pattern: {}", cfg.branch_pattern);
    println!("Ticket key case: {}", cfg.ticket_key_case);
    println!(
        "Update check: every {}h{}",
        cfg.update_check_interval_hours,
        if cfg.disable_update_check {
            " (disabled)"
        } else {
            ""
        }
    );

    Ok(())
}

fn display_value(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
        .unwrap_or_else(|| "<not set>".to_string())
}

fn display_list(values: &[String]) -> String {
    if values.is_empty() {
        "<all>".to_string()
    } else {
        values.join(", ")
    }
}

fn mask_secret(value: &Option<String>) -> String {
    match value {
        Some(token) if token.len() > 6 => {
            let prefix = &token[..3];
            let suffix = &token[token.len() - 3..];
            format!("{prefix}***{suffix}")
        }
        Some(token) if !token.is_empty() => "***".to_string(),
        _ => "<not set>".to_string(),
    }
}
