//! JSON-file stores standing in for the external document store.
//!
//! `stats.json` holds a map from user id to [`UserStats`]; `journeys.json`
//! holds every [`JourneyRecord`] as an array. Each write replaces the file
//! through a temporary sibling so readers never see a partial document.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use greenerway_progress::{JourneyStore, ProgressError, StatsStore};
use greenerway_types::{JourneyId, JourneyRecord, UserId, UserStats};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

async fn read_json<T>(path: &Path) -> Result<T, ProgressError>
where
    T: DeserializeOwned + Default,
{
    match tokio::fs::read_to_string(path).await {
        Ok(contents) if contents.trim().is_empty() => Ok(T::default()),
        Ok(contents) => serde_json::from_str(&contents).map_err(|e| {
            ProgressError::store(format!("failed to parse {}: {e}", path.display()))
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(T::default()),
        Err(e) => Err(ProgressError::store(format!(
            "failed to read {}: {e}",
            path.display()
        ))),
    }
}

async fn write_json<T>(path: &Path, value: &T) -> Result<(), ProgressError>
where
    T: Serialize + Sync,
{
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            ProgressError::store(format!("failed to create {}: {e}", parent.display()))
        })?;
    }
    let contents = serde_json::to_string_pretty(value)
        .map_err(|e| ProgressError::store(format!("failed to encode document: {e}")))?;
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, contents)
        .await
        .map_err(|e| ProgressError::store(format!("failed to write {}: {e}", tmp.display())))?;
    tokio::fs::rename(&tmp, path)
        .await
        .map_err(|e| ProgressError::store(format!("failed to replace {}: {e}", path.display())))
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// [`StatsStore`] over a single JSON map file.
#[derive(Debug)]
pub struct JsonStatsStore {
    path: PathBuf,
    file_lock: Mutex<()>,
}

impl JsonStatsStore {
    /// Store backed by `path`. The file is created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file_lock: Mutex::new(()),
        }
    }
}

impl StatsStore for JsonStatsStore {
    async fn load(&self, user: &UserId) -> Result<UserStats, ProgressError> {
        let _guard = self.file_lock.lock().await;
        let all: BTreeMap<UserId, UserStats> = read_json(&self.path).await?;
        Ok(all.get(user).cloned().unwrap_or_default())
    }

    async fn save(&self, user: &UserId, stats: &UserStats) -> Result<(), ProgressError> {
        let _guard = self.file_lock.lock().await;
        let mut all: BTreeMap<UserId, UserStats> = read_json(&self.path).await?;
        all.insert(user.clone(), stats.clone());
        write_json(&self.path, &all).await
    }
}

// ---------------------------------------------------------------------------
// Journeys
// ---------------------------------------------------------------------------

/// [`JourneyStore`] over a single JSON array file.
#[derive(Debug)]
pub struct JsonJourneyStore {
    path: PathBuf,
    file_lock: Mutex<()>,
}

impl JsonJourneyStore {
    /// Store backed by `path`. The file is created on first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file_lock: Mutex::new(()),
        }
    }
}

impl JourneyStore for JsonJourneyStore {
    async fn append(&self, journey: &JourneyRecord) -> Result<(), ProgressError> {
        let _guard = self.file_lock.lock().await;
        let mut all: Vec<JourneyRecord> = read_json(&self.path).await?;
        all.push(journey.clone());
        write_json(&self.path, &all).await
    }

    async fn list(&self, user: &UserId) -> Result<Vec<JourneyRecord>, ProgressError> {
        let _guard = self.file_lock.lock().await;
        let all: Vec<JourneyRecord> = read_json(&self.path).await?;
        Ok(all.into_iter().filter(|j| &j.user_id == user).collect())
    }

    async fn delete(&self, user: &UserId, id: JourneyId) -> Result<JourneyRecord, ProgressError> {
        let _guard = self.file_lock.lock().await;
        let mut all: Vec<JourneyRecord> = read_json(&self.path).await?;
        let index = all
            .iter()
            .position(|j| j.id == id && &j.user_id == user)
            .ok_or(ProgressError::JourneyNotFound(id))?;
        let removed = all.remove(index);
        write_json(&self.path, &all).await?;
        Ok(removed)
    }
}
