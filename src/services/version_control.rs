use async_trait::async_trait;

use crate::domain::branch::BranchName;
use crate::error::AppResult;

#[async_trait]
pub trait VersionControlService: Send + Sync {
    /// Errors with `AppError::NotARepository` outside a tracked working tree.
    async fn ensure_repository(&self) -> AppResult<()>;
    async fn current_branch(&self) -> AppResult<String>;
    async fn branch_exists(&self, name: &BranchName) -> AppResult<bool>;
    /// Creates the branch from the current commit without switching to it.
    async fn create_branch(&self, name: &BranchName) -> AppResult<()>;
    async fn switch(&self, name: &BranchName) -> AppResult<()>;
    async fn has_uncommitted_changes(&self) -> AppResult<bool>;
}
