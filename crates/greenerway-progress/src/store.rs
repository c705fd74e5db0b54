//! Persistence seams for stats and journeys.
//!
//! The document store behind these traits is external. The in-memory
//! implementations here back tests and single-process use; the engine
//! provides a JSON-file implementation.

use std::collections::HashMap;

use greenerway_types::{JourneyId, JourneyRecord, UserId, UserStats};
use tokio::sync::RwLock;

use crate::error::ProgressError;

/// Per-user [`UserStats`] documents.
pub trait StatsStore: Send + Sync {
    /// Load a user's stats. A user with no document gets empty stats.
    fn load(
        &self,
        user: &UserId,
    ) -> impl Future<Output = Result<UserStats, ProgressError>> + Send;

    /// Replace a user's stats document.
    fn save(
        &self,
        user: &UserId,
        stats: &UserStats,
    ) -> impl Future<Output = Result<(), ProgressError>> + Send;
}

/// Append-only journey records, deletable by explicit user action.
pub trait JourneyStore: Send + Sync {
    /// Append a record.
    fn append(
        &self,
        journey: &JourneyRecord,
    ) -> impl Future<Output = Result<(), ProgressError>> + Send;

    /// Every record of a user, in insertion order.
    fn list(
        &self,
        user: &UserId,
    ) -> impl Future<Output = Result<Vec<JourneyRecord>, ProgressError>> + Send;

    /// Remove one record and return it.
    ///
    /// Returns [`ProgressError::JourneyNotFound`] if the user has no record
    /// with that id.
    fn delete(
        &self,
        user: &UserId,
        id: JourneyId,
    ) -> impl Future<Output = Result<JourneyRecord, ProgressError>> + Send;
}

// ---------------------------------------------------------------------------
// In-memory implementations
// ---------------------------------------------------------------------------

/// [`StatsStore`] backed by a map.
#[derive(Debug, Default)]
pub struct InMemoryStatsStore {
    inner: RwLock<HashMap<UserId, UserStats>>,
}

impl InMemoryStatsStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatsStore for InMemoryStatsStore {
    async fn load(&self, user: &UserId) -> Result<UserStats, ProgressError> {
        Ok(self.inner.read().await.get(user).cloned().unwrap_or_default())
    }

    async fn save(&self, user: &UserId, stats: &UserStats) -> Result<(), ProgressError> {
        self.inner.write().await.insert(user.clone(), stats.clone());
        Ok(())
    }
}

/// [`JourneyStore`] backed by a vector.
#[derive(Debug, Default)]
pub struct InMemoryJourneyStore {
    inner: RwLock<Vec<JourneyRecord>>,
}

impl InMemoryJourneyStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl JourneyStore for InMemoryJourneyStore {
    async fn append(&self, journey: &JourneyRecord) -> Result<(), ProgressError> {
        self.inner.write().await.push(journey.clone());
        Ok(())
    }

    async fn list(&self, user: &UserId) -> Result<Vec<JourneyRecord>, ProgressError> {
        Ok(self
            .inner
            .read()
            .await
            .iter()
            .filter(|j| &j.user_id == user)
            .cloned()
            .collect())
    }

    async fn delete(&self, user: &UserId, id: JourneyId) -> Result<JourneyRecord, ProgressError> {
        let mut records = self.inner.write().await;
        let index = records
            .iter()
            .position(|j| j.id == id && &j.user_id == user)
            .ok_or(ProgressError::JourneyNotFound(id))?;
        Ok(records.remove(index))
    }
}
