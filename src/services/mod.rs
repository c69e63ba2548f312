pub mod cache_store;
pub mod issue_tracker;
pub mod prompt;
pub mod release;
pub mod version_control;

pub use cache_store::CacheStore;
pub use issue_tracker::IssueTrackerService;
pub use prompt::PromptService;
pub use release::ReleaseService;
pub use version_control::VersionControlService;
