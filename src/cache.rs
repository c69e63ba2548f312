use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::config_directory;
use crate::domain::update::UpdateCache;
use crate::domain::version::SemVer;
use crate::error::{AppError, AppResult};
use crate::services::CacheStore;

const CACHE_FILE_NAME: &str = "update_check.json";

#[derive(Default, Serialize, Deserialize)]
struct CacheFile {
    last_checked: Option<DateTime<Utc>>,
    last_known_latest: Option<String>,
}

impl CacheFile {
    fn from_cache(cache: &UpdateCache) -> Self {
        Self {
            last_checked: cache.last_checked,
            last_known_latest: cache
                .last_known_latest
                .as_ref()
                .map(|version| version.to_string()),
        }
    }

    fn into_cache(self) -> UpdateCache {
        UpdateCache {
            last_checked: self.last_checked,
            // An unparsable stored version reads back as "never seen";
            // a stale or hand-edited file must not wedge every command.
            last_known_latest: self
                .last_known_latest
                .and_then(|raw| raw.parse::<SemVer>().ok()),
        }
    }
}

/// Remembers when we last asked the release source for the latest
/// version, stored as a JSON file next to the config.
pub struct FileCacheStore {
    file_path: PathBuf,
}

impl FileCacheStore {
    pub fn at_default_location() -> AppResult<Self> {
        Ok(Self {
            file_path: config_directory()?.join(CACHE_FILE_NAME),
        })
    }

    pub fn at_path(file_path: PathBuf) -> Self {
        Self { file_path }
    }
}

impl CacheStore for FileCacheStore {
    fn read(&self) -> AppResult<UpdateCache> {
        let contents = match fs::read_to_string(&self.file_path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(UpdateCache::default());
            }
            Err(err) => return Err(AppError::Io(err)),
        };

        match serde_json::from_str::<CacheFile>(&contents) {
            Ok(file) => Ok(file.into_cache()),
            // A corrupt cache only costs one extra remote check.
            Err(_) => Ok(UpdateCache::default()),
        }
    }

    fn write(&self, cache: &UpdateCache) -> AppResult<()> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(&CacheFile::from_cache(cache))
            .map_err(|err| AppError::Configuration(format!("failed to write cache: {err}")))?;
        fs::write(&self.file_path, data)?;
        Ok(())
    }
}
