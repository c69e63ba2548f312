use std::io::{self, Write};

use crate::config::{StoredConfig, config_file_path};
use crate::error::{AppError, AppResult};
use crate::infra::jira::JiraClient;

/// Interactive wizard. Each section is saved as soon as it is answered,
/// so a failed connection test does not throw away the credentials the
/// user just typed.
pub async fn run() -> AppResult<()> {
    // An unparsable config must not lock the user out of the one command
    // that can rewrite it.
    let mut cfg = match StoredConfig::load() {
        Ok(cfg) => cfg,
        Err(AppError::Configuration(_)) => {
            println!("Warning: could not read the existing config; starting fresh.");
            StoredConfig::default()
        }
        Err(err) => return Err(err),
    };

    println!("Baton setup");
    println!("This will configure your Jira credentials and branch naming.");
    println!("Press Enter to keep the current value, '-' to clear it.");
    println!("Secrets are stored in the local config file; protect your filesystem accordingly.");
    println!();

    apply_prompt(
        "Jira base URL (e.g., https://company.atlassian.net)",
        &mut cfg.jira_base_url,
        false,
    )?;
    apply_prompt("Jira email", &mut cfg.jira_email, false)?;
    println!("Get an API token from: https://id.atlassian.com/manage-profile/security/api-tokens");
    apply_prompt("Jira API token", &mut cfg.jira_token, true)?;
    cfg.save()?;

    println!("\nTesting connection...");
    let client = JiraClient::new(
        cfg.jira_base_url.clone(),
        cfg.jira_email.clone(),
        cfg.jira_token.clone(),
    );
    match client.verify_credentials().await {
        Ok(name) => println!("Connected to Jira as {name}."),
        Err(err) => {
            println!("Could not connect to Jira.");
            println!("Please verify:");
            println!("  - the email is your full Jira email address");
            println!("  - the API token is valid and not expired");
            println!("  - the base URL points at your site");
            println!("Your answers so far are saved; run 'baton setup' again to retry.");
            return Err(err);
        }
    }

    println!();
    apply_list_prompt(
        "Project keys to include, comma-separated (empty = all projects)",
        &mut cfg.project_keys,
    )?;
    apply_list_prompt(
        "Ticket statuses to include, comma-separated (empty = all statuses)",
        &mut cfg.ticket_statuses,
    )?;
    cfg.save()?;

    print_prefix_examples();
    apply_bool_prompt(
        "Use branch prefixes (recommended for clarity)?",
        &mut cfg.use_branch_prefixes,
    )?;
    cfg.save()?;

    let path = config_file_path()?;
    let rule = "=".repeat(50);
    println!("\n{rule}");
    println!("Setup complete!");
    println!("{rule}");
    println!("   Server:           {}", display_value(&cfg.jira_base_url));
    println!("   Email:            {}", display_value(&cfg.jira_email));
    println!("   Projects:         {}", display_list(&cfg.project_keys, "All projects"));
    println!("   Statuses:         {}", display_list(&cfg.ticket_statuses, "All statuses"));
    println!(
        "   Branch prefixes:  {}",
        if cfg.use_branch_prefixes { "enabled" } else { "disabled" }
    );
    println!("   Config file:      {}", path.display());
    println!("\nRun 'baton branch' to create your first branch.");
    Ok(())
}

fn print_prefix_examples() {
    let rule = "=".repeat(50);
    println!("\n{rule}");
    println!("Branch prefix configuration");
    println!("{rule}");
    println!("\nWith prefixes enabled:");
    println!("  - Bug:         bugfix/CDEM-123-fix-login-error");
    println!("  - Story:       feature/CDEM-456-user-dashboard");
    println!("  - Task:        feature/CDEM-789-update-docs");
    println!("  - Epic:        feature/CDEM-101-roadmap-item");
    println!("  - Improvement: improvement/CDEM-202-refactor-api");
    println!("  - Spike:       spike/CDEM-303-research-solution");
    println!("\nWithout prefixes:");
    println!("  - Bug:         CDEM-123-fix-login-error");
    println!("  - Story:       CDEM-456-user-dashboard");
    println!();
}

fn apply_prompt(field: &str, target: &mut Option<String>, secret: bool) -> AppResult<()> {
    match prompt(field, target.as_deref(), secret)? {
        PromptAction::Keep => {}
        PromptAction::Clear => *target = None,
        PromptAction::Set(value) => *target = Some(value),
    }
    Ok(())
}

fn apply_list_prompt(field: &str, target: &mut Vec<String>) -> AppResult<()> {
    let shown = if target.is_empty() {
        None
    } else {
        Some(target.join(", "))
    };
    match prompt(field, shown.as_deref(), false)? {
        PromptAction::Keep => {}
        PromptAction::Clear => target.clear(),
        PromptAction::Set(value) => *target = parse_list(&value),
    }
    Ok(())
}

fn apply_bool_prompt(field: &str, target: &mut bool) -> AppResult<()> {
    let current = if *target { "yes" } else { "no" };
    match prompt(field, Some(current), false)? {
        PromptAction::Keep | PromptAction::Clear => {}
        PromptAction::Set(value) => match value.to_lowercase().as_str() {
            "y" | "yes" | "true" => *target = true,
            "n" | "no" | "false" => *target = false,
            _ => println!("Unrecognized answer '{value}', keeping '{current}'."),
        },
    }
    Ok(())
}

fn prompt(field: &str, current: Option<&str>, secret: bool) -> AppResult<PromptAction> {
    let mut stdout = io::stdout();

    match (current, secret) {
        (Some(_), true) => write!(stdout, "{field} [****] (Enter to keep, '-' to clear): ")?,
        (Some(value), false) => {
            write!(stdout, "{field} [{value}] (Enter to keep, '-' to clear): ")?
        }
        (None, _) => write!(stdout, "{field} (Enter to skip): ")?,
    }
    stdout.flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let trimmed = input.trim();

    if trimmed.is_empty() {
        Ok(PromptAction::Keep)
    } else if trimmed == "-" {
        Ok(PromptAction::Clear)
    } else {
        Ok(PromptAction::Set(trimmed.to_string()))
    }
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn display_value(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
        .unwrap_or_else(|| "<not set>".to_string())
}

fn display_list(values: &[String], empty_label: &str) -> String {
    if values.is_empty() {
        empty_label.to_string()
    } else {
        values.join(", ")
    }
}

enum PromptAction {
    Keep,
    Clear,
    Set(String),
}
