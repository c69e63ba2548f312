use async_trait::async_trait;

use crate::domain::version::SemVer;
use crate::error::AppResult;

#[async_trait]
pub trait ReleaseService: Send + Sync {
    /// Latest published release version, from the remote release source.
    async fn fetch_latest_version(&self) -> AppResult<SemVer>;
}
