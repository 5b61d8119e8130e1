use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use super::CandidateRecord;
use crate::store::{RecordStore, StoreError};

const SNAPSHOT_KEY: &str = "records";

/// Default staleness window for the record snapshot.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// Time-bounded copy of the full record set.
///
/// The store stays the source of truth: the snapshot expires after the
/// configured window and every successful write calls [`RecordCache::invalidate`],
/// so the next read after a mutation always goes back to the store.
#[derive(Debug, Clone)]
pub struct RecordCache {
    cache: Cache<&'static str, Arc<Vec<CandidateRecord>>>,
}

impl RecordCache {
    pub fn new(ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(ttl)
            .build();

        Self { cache }
    }

    /// Returns the cached snapshot, fetching from the store when it is missing
    /// or older than the staleness window.
    pub async fn get(
        &self,
        store: &dyn RecordStore,
    ) -> Result<Arc<Vec<CandidateRecord>>, StoreError> {
        if let Some(snapshot) = self.cache.get(SNAPSHOT_KEY).await {
            debug!(records = snapshot.len(), "Record snapshot served from cache");
            return Ok(snapshot);
        }

        let rows = store.read_all().await?;
        let snapshot: Arc<Vec<CandidateRecord>> =
            Arc::new(rows.iter().map(CandidateRecord::from_row).collect());

        self.cache.insert(SNAPSHOT_KEY, snapshot.clone()).await;
        debug!(records = snapshot.len(), "Record snapshot refreshed from store");
        Ok(snapshot)
    }

    /// Drops the snapshot so the next `get` re-reads the store.
    pub async fn invalidate(&self) {
        self.cache.invalidate(SNAPSHOT_KEY).await;
        info!("Record cache invalidated");
    }
}

impl Default for RecordCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
