use clap::Args;

use crate::context::AppContext;
use crate::domain::version::SemVer;
use crate::error::AppResult;

#[derive(Args, Debug, Clone)]
pub struct VersionArgs {
    /// Also look up the latest published release.
    #[arg(long)]
    pub latest: bool,
}

pub async fn run(ctx: &AppContext, args: VersionArgs) -> AppResult<()> {
    let current = SemVer::current()?;
    println!("baton v{current}");

    if !args.latest {
        return Ok(());
    }

    let latest = ctx.release_source.fetch_latest_version().await?;
    println!("Latest release: v{latest}");
    if latest.is_newer_than(current) {
        println!("Update available. Run 'baton update' to install it.");
    } else {
        println!("You're up to date.");
    }
    Ok(())
}
