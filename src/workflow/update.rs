use chrono::{DateTime, Utc};

use crate::context::AppContext;
use crate::domain::update::{UpdateCache, UpdateOutcome};
use crate::domain::version::SemVer;
use crate::error::AppResult;

/// Checks for a newer release if enough time has passed since the last
/// attempt. Every network attempt, successful or not, moves the clock
/// forward so a broken release source cannot turn into a check on every
/// invocation.
pub async fn check_for_update(
    ctx: &AppContext,
    local: SemVer,
    now: DateTime<Utc>,
) -> AppResult<UpdateOutcome> {
    let cache = ctx.cache_store.read()?;
    if !cache.should_check_now(now, ctx.config.update.interval) {
        return Ok(UpdateOutcome::NoCheckPerformed);
    }
    perform_check(ctx, cache, local, now).await
}

/// Checks immediately, ignoring the interval gate. Used by the explicit
/// `update` and `version --latest` commands where the user asked for it.
pub async fn force_check(
    ctx: &AppContext,
    local: SemVer,
    now: DateTime<Utc>,
) -> AppResult<UpdateOutcome> {
    let cache = ctx.cache_store.read()?;
    perform_check(ctx, cache, local, now).await
}

async fn perform_check(
    ctx: &AppContext,
    cache: UpdateCache,
    local: SemVer,
    now: DateTime<Utc>,
) -> AppResult<UpdateOutcome> {
    match ctx.release_source.fetch_latest_version().await {
        Ok(latest) => {
            ctx.cache_store.write(&cache.record_check(now, Some(latest)))?;
            if latest.is_newer_than(local) {
                Ok(UpdateOutcome::UpdateAvailable {
                    current: local,
                    latest,
                })
            } else {
                Ok(UpdateOutcome::UpToDate { current: local })
            }
        }
        Err(err) => {
            ctx.cache_store.write(&cache.record_check(now, None))?;
            Ok(UpdateOutcome::CheckFailed(err.to_string()))
        }
    }
}

pub fn update_banner(current: SemVer, latest: SemVer, repo: &str) -> String {
    let rule = "=".repeat(60);
    format!(
        "{rule}\n\
         A new version of baton is available: v{latest} (current: v{current})\n\
         \n\
         Update now:  baton update\n\
         Or manually: curl -fsSL https://raw.githubusercontent.com/{repo}/main/install.sh | sh\n\
         Release notes: https://github.com/{repo}/releases/latest\n\
         {rule}"
    )
}
