mod cache;
mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod services;
mod workflow;

use std::sync::Arc;

use chrono::Utc;
use clap::{Parser, Subcommand};

use crate::cache::FileCacheStore;
use crate::cmd::branch::BranchArgs;
use crate::cmd::config::{self as config_cmd, ConfigArgs};
use crate::cmd::update::UpdateArgs;
use crate::cmd::version::VersionArgs;
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::domain::update::UpdateOutcome;
use crate::domain::version::SemVer;
use crate::error::AppResult;
use crate::infra::git::GitCli;
use crate::infra::github::{GITHUB_REPO, GitHubReleases};
use crate::infra::jira::JiraClient;
use crate::infra::terminal::TerminalPrompt;
use crate::workflow::update::{check_for_update, update_banner};

#[derive(Parser)]
#[command(
    name = "baton",
    author,
    version,
    about = "Create git branches from your assigned Jira tickets",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Configure Jira credentials and branch naming interactively.
    Setup,
    /// Pick an assigned ticket and create a matching branch.
    #[command(visible_alias = "b")]
    Branch(BranchArgs),
    /// Check for a newer release and optionally install it.
    Update(UpdateArgs),
    /// Show the installed version.
    Version(VersionArgs),
    /// Manage CLI configuration.
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Setup => cmd::setup::run().await,
        Commands::Config(args) => config_cmd::run(args.command),
        Commands::Branch(args) => {
            let ctx = build_context()?;
            maybe_notify_update(&ctx).await;
            cmd::branch::run(&ctx, args).await
        }
        Commands::Update(args) => {
            let ctx = build_context()?;
            cmd::update::run(&ctx, args).await
        }
        Commands::Version(args) => {
            let ctx = build_context()?;
            cmd::version::run(&ctx, args).await
        }
    }
}

fn build_context() -> AppResult<AppContext> {
    let cwd = std::env::current_dir()?;
    let config = AppConfig::load()?;

    let version_control = Arc::new(GitCli::new(cwd));
    let issue_tracker = Arc::new(JiraClient::new(
        config.jira_base_url.clone(),
        config.jira_email.clone(),
        config.jira_token.clone(),
    ));
    let release_source = Arc::new(GitHubReleases::new(GITHUB_REPO));
    let prompt = Arc::new(TerminalPrompt::new());
    let cache_store = Arc::new(FileCacheStore::at_default_location()?);

    Ok(AppContext::new(
        config,
        version_control,
        issue_tracker,
        release_source,
        prompt,
        cache_store,
    ))
}

/// Passive update notice ahead of the branch workflow. Failures degrade
/// to a note on stderr; they never block branch creation.
async fn maybe_notify_update(ctx: &AppContext) {
    if ctx.config.update.disabled {
        return;
    }
    let Ok(current) = SemVer::current() else {
        return;
    };
    match check_for_update(ctx, current, Utc::now()).await {
        Ok(UpdateOutcome::UpdateAvailable { current, latest }) => {
            println!("{}", update_banner(current, latest, GITHUB_REPO));
            println!();
        }
        Ok(UpdateOutcome::CheckFailed(reason)) => {
            eprintln!("Note: update check failed ({reason}).");
        }
        Ok(_) => {}
        Err(err) => {
            eprintln!("Note: update check failed ({err}).");
        }
    }
}
