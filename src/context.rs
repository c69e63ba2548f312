use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::{
    CacheStore, IssueTrackerService, PromptService, ReleaseService, VersionControlService,
};

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub version_control: Arc<dyn VersionControlService>,
    pub issue_tracker: Arc<dyn IssueTrackerService>,
    pub release_source: Arc<dyn ReleaseService>,
    pub prompt: Arc<dyn PromptService>,
    pub cache_store: Arc<dyn CacheStore>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        version_control: Arc<dyn VersionControlService>,
        issue_tracker: Arc<dyn IssueTrackerService>,
        release_source: Arc<dyn ReleaseService>,
        prompt: Arc<dyn PromptService>,
        cache_store: Arc<dyn CacheStore>,
    ) -> Self {
        Self {
            config,
            version_control,
            issue_tracker,
            release_source,
            prompt,
            cache_store,
        }
    }
}
