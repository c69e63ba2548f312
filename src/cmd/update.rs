use chrono::Utc;
use clap::Args;

use crate::context::AppContext;
use crate::domain::update::UpdateOutcome;
use crate::domain::version::SemVer;
use crate::error::{AppError, AppResult};
use crate::infra::github::GITHUB_REPO;
use crate::infra::installer;
use crate::workflow::update::{force_check, update_banner};

#[derive(Args, Debug, Clone)]
pub struct UpdateArgs {
    /// Only report whether an update exists, never run the installer.
    #[arg(long)]
    pub check: bool,
}

pub async fn run(ctx: &AppContext, args: UpdateArgs) -> AppResult<()> {
    let current = SemVer::current()?;
    println!("Checking for updates (current: v{current})...");

    match force_check(ctx, current, Utc::now()).await? {
        UpdateOutcome::UpToDate { current } => {
            println!("You're up to date (v{current}).");
            Ok(())
        }
        UpdateOutcome::UpdateAvailable { current, latest } => {
            println!("{}", update_banner(current, latest, GITHUB_REPO));
            if args.check {
                return Ok(());
            }
            if ctx.prompt.confirm("Install the update now?", true)? {
                installer::download_and_run(GITHUB_REPO).await?;
                println!("Update installed. Restart baton to use v{latest}.");
            } else {
                println!("Skipped. Run 'baton update' when you're ready.");
            }
            Ok(())
        }
        UpdateOutcome::CheckFailed(reason) => Err(AppError::Update(reason)),
        // force_check never gates, so this arm is unreachable in practice.
        UpdateOutcome::NoCheckPerformed => Ok(()),
    }
}
