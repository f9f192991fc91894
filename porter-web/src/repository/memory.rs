//! In-memory job store
//!
//! Reference [`JobStore`] used when no database is configured and in tests.

use async_trait::async_trait;
use porter_core::domain::job::{JobPhase, PortabilityJob};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::job::{JobStore, StoreError, ensure_same_id};

/// Job store backed by a map behind an async read-write lock
#[derive(Default)]
pub struct InMemoryJobStore {
    jobs: RwLock<HashMap<Uuid, PortabilityJob>>,
}

impl InMemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(dead_code)]
    pub async fn len(&self) -> usize {
        self.jobs.read().await.len()
    }
}

#[async_trait]
impl JobStore for InMemoryJobStore {
    async fn find(&self, id: Uuid) -> Result<Option<PortabilityJob>, StoreError> {
        Ok(self.jobs.read().await.get(&id).cloned())
    }

    async fn insert(&self, job: PortabilityJob) -> Result<(), StoreError> {
        let mut jobs = self.jobs.write().await;
        if jobs.contains_key(&job.id) {
            return Err(StoreError::AlreadyExists(job.id));
        }
        jobs.insert(job.id, job);
        Ok(())
    }

    async fn replace(&self, id: Uuid, job: PortabilityJob) -> Result<(), StoreError> {
        ensure_same_id(id, &job)?;

        let mut jobs = self.jobs.write().await;
        let slot = jobs.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        *slot = job;
        Ok(())
    }

    async fn replace_if_phase(
        &self,
        id: Uuid,
        expected: JobPhase,
        job: PortabilityJob,
    ) -> Result<bool, StoreError> {
        ensure_same_id(id, &job)?;

        let mut jobs = self.jobs.write().await;
        let slot = jobs.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        if slot.phase() != expected {
            return Ok(false);
        }
        *slot = job;
        Ok(true)
    }
}
