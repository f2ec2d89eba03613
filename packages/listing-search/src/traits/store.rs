//! Stage Result Store trait.

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::error::{Result, SearchError};

/// Opaque key/value handoff between pipeline stages.
///
/// Values are write-once, read-many within a run and carry no TTL or
/// versioning; callers generate a fresh id per run to avoid
/// collisions. The required guarantees are atomic writes and
/// read-after-write consistency; each stage performs one write per
/// logical result, so no finer-grained coordination is needed.
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Store a value under a freshly generated id and return the id.
    async fn put(&self, value: &Value) -> Result<Uuid>;

    /// Store a value under a caller-supplied id.
    ///
    /// Used for the final ranked list, whose id the caller hands in so
    /// a separate reader can retrieve it later.
    async fn put_with_id(&self, id: Uuid, value: &Value) -> Result<()>;

    /// Fetch a value by id. `None` when the id does not resolve.
    async fn get(&self, id: Uuid) -> Result<Option<Value>>;

    /// Fetch a value that a stage depends on.
    ///
    /// A missing id here is fatal to the dependent stage: it surfaces
    /// as [`SearchError::MissingStageResult`] rather than proceeding
    /// on empty data.
    async fn get_required(&self, id: Uuid) -> Result<Value> {
        self.get(id)
            .await?
            .ok_or(SearchError::MissingStageResult { id })
    }
}
