use std::io;

use thiserror::Error;

use crate::domain::version::ParseVersionError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("not a git repository: run baton from inside a git working tree")]
    NotARepository,
    #[error("branch '{0}' already exists")]
    BranchAlreadyExists(String),
    #[error("version control error: {0}")]
    VersionControl(String),
    #[error("issue tracker error: {0}")]
    IssueTracker(String),
    #[error("release source error: {0}")]
    ReleaseSource(String),
    #[error("update failed: {0}")]
    Update(String),
    #[error(transparent)]
    Version(#[from] ParseVersionError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
