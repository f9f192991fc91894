//! Job Store
//!
//! Storage contract for portability jobs, keyed by job id.

use async_trait::async_trait;
use porter_core::domain::job::{JobPhase, PortabilityJob};
use thiserror::Error;
use uuid::Uuid;

/// Errors produced by [`JobStore`] operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("job {0} not found")]
    NotFound(Uuid),

    #[error("job {0} already exists")]
    AlreadyExists(Uuid),

    #[error("record for job {record} cannot be stored under id {key}")]
    IdMismatch { key: Uuid, record: Uuid },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("stored auth data is not valid: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Keyed persistence for portability jobs
///
/// Implementations must be `Send + Sync` for use behind `Arc<dyn JobStore>`.
/// Every write replaces the whole record. Callers that cannot tolerate lost
/// updates re-fetch right before writing, or use [`JobStore::replace_if_phase`].
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Look up a job. Returns `Ok(None)` when no job has this id.
    async fn find(&self, id: Uuid) -> Result<Option<PortabilityJob>, StoreError>;

    /// Store a new job. Fails with [`StoreError::AlreadyExists`] if the id is taken.
    async fn insert(&self, job: PortabilityJob) -> Result<(), StoreError>;

    /// Overwrite an existing job with `job`.
    async fn replace(&self, id: Uuid, job: PortabilityJob) -> Result<(), StoreError>;

    /// Overwrite an existing job only while its stored phase is still `expected`.
    ///
    /// Returns `true` if the write was applied, `false` if the stored job had
    /// moved to another phase. The check and the write are atomic.
    async fn replace_if_phase(
        &self,
        id: Uuid,
        expected: JobPhase,
        job: PortabilityJob,
    ) -> Result<bool, StoreError>;
}

pub(crate) fn ensure_same_id(key: Uuid, job: &PortabilityJob) -> Result<(), StoreError> {
    if key != job.id {
        return Err(StoreError::IdMismatch {
            key,
            record: job.id,
        });
    }
    Ok(())
}
