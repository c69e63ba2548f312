use crate::domain::update::UpdateCache;
use crate::error::AppResult;

pub trait CacheStore: Send + Sync {
    /// A missing or unreadable cache reads as the default (never checked).
    fn read(&self) -> AppResult<UpdateCache>;
    fn write(&self, cache: &UpdateCache) -> AppResult<()>;
}
