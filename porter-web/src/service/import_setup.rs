//! Import Setup Service
//!
//! Starts import authorization for a job whose export side is already
//! authorized: validates the job's phase, resolves the import service's
//! generator, and stores any provisional handshake state it returns.
//!
//! A job moves through this step at most once. A second attempt on the same
//! job, or one racing the first, is rejected instead of starting a new
//! handshake that could orphan the state stored by the first.

use porter_core::domain::data_type::DataType;
use porter_core::domain::job::{JobPhase, PortabilityJob};
use porter_core::dto::import_setup::ImportSetupResponse;
use porter_core::token::{self, TokenError};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::capability::{CapabilityRegistry, GeneratorError};
use crate::repository::{JobStore, StoreError};

/// Service error type
#[derive(Debug, Error)]
pub enum ImportSetupError {
    #[error("invalid job token: {0}")]
    InvalidToken(#[from] TokenError),

    #[error("job {0} not found")]
    JobNotFound(Uuid),

    #[error("job {job_id} cannot start import authorization: {reason}")]
    InvalidJobState {
        job_id: Uuid,
        reason: InvalidStateReason,
    },

    #[error("no authorization generator registered for service '{service}' and data type {data_type}")]
    UnsupportedCapability { service: String, data_type: DataType },

    #[error("authorization url generation failed: {0}")]
    DownstreamGenerator(#[source] GeneratorError),

    #[error("job store failure: {0}")]
    Persistence(#[from] StoreError),
}

/// Why a job is not in a state that allows starting import authorization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidStateReason {
    MissingExportService,
    MissingExportAuthData,
    MissingImportService,
    ImportAuthAlreadyPresent,
    UnknownDataType(String),
}

impl InvalidStateReason {
    /// Stable code reported to clients
    pub fn code(&self) -> &'static str {
        match self {
            InvalidStateReason::MissingExportService => "missing_export_service",
            InvalidStateReason::MissingExportAuthData => "missing_export_auth_data",
            InvalidStateReason::MissingImportService => "missing_import_service",
            InvalidStateReason::ImportAuthAlreadyPresent => "import_auth_already_present",
            InvalidStateReason::UnknownDataType(_) => "unknown_data_type",
        }
    }
}

impl std::fmt::Display for InvalidStateReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidStateReason::MissingExportService => write!(f, "export service is not set"),
            InvalidStateReason::MissingExportAuthData => {
                write!(f, "export authorization has not completed")
            }
            InvalidStateReason::MissingImportService => write!(f, "import service is not set"),
            InvalidStateReason::ImportAuthAlreadyPresent => {
                write!(f, "import authorization has already started")
            }
            InvalidStateReason::UnknownDataType(name) => write!(f, "unknown data type '{}'", name),
        }
    }
}

/// Orchestrates the export-authorized -> import-auth-initiated transition
///
/// Stateless apart from its collaborators; share one instance behind an `Arc`.
pub struct ImportSetupService {
    jobs: Arc<dyn JobStore>,
    registry: Arc<CapabilityRegistry>,
}

impl ImportSetupService {
    pub fn new(jobs: Arc<dyn JobStore>, registry: Arc<CapabilityRegistry>) -> Self {
        Self { jobs, registry }
    }

    /// Begin import authorization for the job behind `job_token`
    ///
    /// Returns the payload the caller needs to redirect the user to the
    /// import service. Any failure leaves the stored job untouched.
    pub async fn begin_import_auth(
        &self,
        job_token: &str,
    ) -> Result<ImportSetupResponse, ImportSetupError> {
        let job_id = token::decode(job_token)?;
        let job = self.find_job(job_id).await?;

        debug!("Import setup requested for job {} in phase {}", job_id, job.phase());

        let data_type = check_preconditions(&job).map_err(|reason| {
            warn!("Rejecting import setup for job {}: {}", job_id, reason);
            ImportSetupError::InvalidJobState { job_id, reason }
        })?;

        let generator = self
            .registry
            .resolve(&job.import_service, data_type)
            .ok_or_else(|| ImportSetupError::UnsupportedCapability {
                service: job.import_service.clone(),
                data_type,
            })?;

        let initiator = generator
            .generate_auth_url(&token::encode(job.id))
            .await
            .map_err(ImportSetupError::DownstreamGenerator)?;

        if let Some(initial_auth_data) = initiator.initial_auth_data {
            self.store_initial_auth_data(job_id, initial_auth_data)
                .await?;
        }

        info!(
            "Import authorization started for job {} ({} -> {}, {})",
            job_id, job.export_service, job.import_service, data_type
        );

        Ok(ImportSetupResponse {
            data_type: job.data_type,
            export_service: job.export_service,
            import_service: job.import_service,
            import_auth_url: initiator.auth_url,
        })
    }

    async fn find_job(&self, job_id: Uuid) -> Result<PortabilityJob, ImportSetupError> {
        self.jobs
            .find(job_id)
            .await?
            .ok_or(ImportSetupError::JobNotFound(job_id))
    }

    /// Attach provisional import handshake state to the current stored job
    ///
    /// The job is fetched again because the generator call may have been slow
    /// and another request may have started import authorization meanwhile.
    async fn store_initial_auth_data(
        &self,
        job_id: Uuid,
        initial_auth_data: serde_json::Value,
    ) -> Result<(), ImportSetupError> {
        let current = self.find_job(job_id).await?;
        if current.import_auth_data.is_some() {
            warn!("Job {} gained import auth data during setup", job_id);
            return Err(ImportSetupError::InvalidJobState {
                job_id,
                reason: InvalidStateReason::ImportAuthAlreadyPresent,
            });
        }

        let updated = current.with_initial_import_auth(initial_auth_data);
        let applied = self
            .jobs
            .replace_if_phase(job_id, JobPhase::ExportAuthorized, updated)
            .await?;

        if !applied {
            warn!("Job {} left the export-authorized phase during setup", job_id);
            return Err(ImportSetupError::InvalidJobState {
                job_id,
                reason: InvalidStateReason::ImportAuthAlreadyPresent,
            });
        }

        debug!("Stored initial import auth data for job {}", job_id);
        Ok(())
    }
}

// =============================================================================
// Validation
// =============================================================================

/// Check, in order, everything that must hold before import authorization starts
fn check_preconditions(job: &PortabilityJob) -> Result<DataType, InvalidStateReason> {
    if job.export_service.trim().is_empty() {
        return Err(InvalidStateReason::MissingExportService);
    }
    if job.export_auth_data.is_none() {
        return Err(InvalidStateReason::MissingExportAuthData);
    }
    if job.import_service.trim().is_empty() {
        return Err(InvalidStateReason::MissingImportService);
    }
    if job.import_auth_data.is_some() {
        return Err(InvalidStateReason::ImportAuthAlreadyPresent);
    }
    job.parsed_data_type()
        .map_err(|unknown| InvalidStateReason::UnknownDataType(unknown.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use porter_core::domain::auth::AuthData;
    use serde_json::json;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Barrier;

    use crate::capability::{AuthFlowInitiator, AuthUrlGenerator};
    use crate::repository::InMemoryJobStore;

    // =========================================================================
    // Test doubles
    // =========================================================================

    /// Generator returning a fixed outcome and recording the tokens it saw
    struct ScriptedGenerator {
        auth_url: &'static str,
        initial_auth_data: Option<serde_json::Value>,
        fail: bool,
        barrier: Option<Arc<Barrier>>,
        tokens: Mutex<Vec<String>>,
    }

    impl ScriptedGenerator {
        fn redirect(auth_url: &'static str) -> Self {
            Self {
                auth_url,
                initial_auth_data: None,
                fail: false,
                barrier: None,
                tokens: Mutex::new(Vec::new()),
            }
        }

        fn with_initial(mut self, data: serde_json::Value) -> Self {
            self.initial_auth_data = Some(data);
            self
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::redirect("https://unused")
            }
        }

        fn waiting_on(mut self, barrier: Arc<Barrier>) -> Self {
            self.barrier = Some(barrier);
            self
        }

        fn calls(&self) -> usize {
            self.tokens.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl AuthUrlGenerator for ScriptedGenerator {
        async fn generate_auth_url(
            &self,
            job_token: &str,
        ) -> Result<AuthFlowInitiator, GeneratorError> {
            self.tokens.lock().unwrap().push(job_token.to_string());
            if let Some(barrier) = &self.barrier {
                barrier.wait().await;
            }
            if self.fail {
                return Err(GeneratorError::Request {
                    service: "B".to_string(),
                    message: "connection refused".to_string(),
                });
            }
            Ok(AuthFlowInitiator {
                auth_url: self.auth_url.to_string(),
                initial_auth_data: self.initial_auth_data.clone(),
            })
        }
    }

    /// Store wrapper counting writes
    #[derive(Default)]
    struct RecordingStore {
        inner: InMemoryJobStore,
        writes: AtomicUsize,
    }

    impl RecordingStore {
        fn writes(&self) -> usize {
            self.writes.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl JobStore for RecordingStore {
        async fn find(&self, id: Uuid) -> Result<Option<PortabilityJob>, StoreError> {
            self.inner.find(id).await
        }

        async fn insert(&self, job: PortabilityJob) -> Result<(), StoreError> {
            self.inner.insert(job).await
        }

        async fn replace(&self, id: Uuid, job: PortabilityJob) -> Result<(), StoreError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.inner.replace(id, job).await
        }

        async fn replace_if_phase(
            &self,
            id: Uuid,
            expected: JobPhase,
            job: PortabilityJob,
        ) -> Result<bool, StoreError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.inner.replace_if_phase(id, expected, job).await
        }
    }

    /// Store whose every operation fails
    struct BrokenStore;

    #[async_trait]
    impl JobStore for BrokenStore {
        async fn find(&self, _id: Uuid) -> Result<Option<PortabilityJob>, StoreError> {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        }

        async fn insert(&self, _job: PortabilityJob) -> Result<(), StoreError> {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        }

        async fn replace(&self, _id: Uuid, _job: PortabilityJob) -> Result<(), StoreError> {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        }

        async fn replace_if_phase(
            &self,
            _id: Uuid,
            _expected: JobPhase,
            _job: PortabilityJob,
        ) -> Result<bool, StoreError> {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        }
    }

    // =========================================================================
    // Fixtures
    // =========================================================================

    fn export_authorized_job() -> PortabilityJob {
        PortabilityJob::new("PHOTOS", "A", "B").with_export_auth(AuthData::finalized("x"))
    }

    struct Fixture {
        store: Arc<RecordingStore>,
        generator: Arc<ScriptedGenerator>,
        service: ImportSetupService,
    }

    fn fixture(generator: ScriptedGenerator) -> Fixture {
        let store = Arc::new(RecordingStore::default());
        let generator = Arc::new(generator);

        let mut registry = CapabilityRegistry::new();
        registry.register("B", DataType::Photos, generator.clone());

        let service = ImportSetupService::new(store.clone(), Arc::new(registry));
        Fixture {
            store,
            generator,
            service,
        }
    }

    async fn stored(fixture: &Fixture, job_id: Uuid) -> PortabilityJob {
        fixture.store.find(job_id).await.unwrap().unwrap()
    }

    fn assert_invalid_state(
        result: Result<ImportSetupResponse, ImportSetupError>,
        expected: InvalidStateReason,
    ) {
        match result {
            Err(ImportSetupError::InvalidJobState { reason, .. }) => assert_eq!(reason, expected),
            other => panic!("expected InvalidJobState({:?}), got {:?}", expected, other),
        }
    }

    // =========================================================================
    // Success paths
    // =========================================================================

    #[tokio::test]
    async fn test_stateless_generator_leaves_job_unchanged() {
        let f = fixture(ScriptedGenerator::redirect("https://b/auth"));
        let job = export_authorized_job();
        f.store.insert(job.clone()).await.unwrap();

        let response = f.service.begin_import_auth(&token::encode(job.id)).await.unwrap();

        assert_eq!(
            response,
            ImportSetupResponse {
                data_type: "PHOTOS".to_string(),
                export_service: "A".to_string(),
                import_service: "B".to_string(),
                import_auth_url: "https://b/auth".to_string(),
            }
        );
        assert_eq!(stored(&f, job.id).await, job);
        assert_eq!(f.store.writes(), 0);
    }

    #[tokio::test]
    async fn test_provisional_data_is_stored() {
        let f = fixture(ScriptedGenerator::redirect("https://b/auth").with_initial(json!("token123")));
        let job = export_authorized_job();
        f.store.insert(job.clone()).await.unwrap();

        let response = f.service.begin_import_auth(&token::encode(job.id)).await.unwrap();

        assert_eq!(response.import_auth_url, "https://b/auth");
        assert_eq!(response.data_type, "PHOTOS");

        let after = stored(&f, job.id).await;
        assert_eq!(after.import_auth_data, Some(AuthData::initial("token123")));
        assert_eq!(after.phase(), JobPhase::ImportAuthInitiated);
        assert_eq!(after.export_auth_data, job.export_auth_data);
        assert_eq!(f.store.writes(), 1);
    }

    #[tokio::test]
    async fn test_generator_receives_job_token() {
        let f = fixture(ScriptedGenerator::redirect("https://b/auth"));
        let job = export_authorized_job();
        f.store.insert(job.clone()).await.unwrap();

        // Surrounding whitespace from the transport is tolerated; the generator
        // gets a freshly encoded token.
        let token = format!(" {} ", token::encode(job.id));
        f.service.begin_import_auth(&token).await.unwrap();

        let tokens = f.generator.tokens.lock().unwrap().clone();
        assert_eq!(tokens, vec![token::encode(job.id)]);
        assert_eq!(token::decode(&tokens[0]), Ok(job.id));
    }

    // =========================================================================
    // Rejections
    // =========================================================================

    #[tokio::test]
    async fn test_invalid_token() {
        let f = fixture(ScriptedGenerator::redirect("https://b/auth"));

        let result = f.service.begin_import_auth("").await;
        assert!(matches!(result, Err(ImportSetupError::InvalidToken(TokenError::Empty))));

        let result = f.service.begin_import_auth("%%%").await;
        assert!(matches!(result, Err(ImportSetupError::InvalidToken(_))));
        assert_eq!(f.generator.calls(), 0);
    }

    #[tokio::test]
    async fn test_unknown_job() {
        let f = fixture(ScriptedGenerator::redirect("https://b/auth"));
        let missing = Uuid::new_v4();

        let result = f.service.begin_import_auth(&token::encode(missing)).await;
        assert!(matches!(result, Err(ImportSetupError::JobNotFound(id)) if id == missing));
    }

    #[tokio::test]
    async fn test_import_auth_already_present() {
        let f = fixture(ScriptedGenerator::redirect("https://b/auth"));
        let job = export_authorized_job().with_import_auth(AuthData::initial("present"));
        f.store.insert(job.clone()).await.unwrap();

        let result = f.service.begin_import_auth(&token::encode(job.id)).await;

        assert_invalid_state(result, InvalidStateReason::ImportAuthAlreadyPresent);
        assert_eq!(stored(&f, job.id).await, job);
        assert_eq!(f.generator.calls(), 0);
        assert_eq!(f.store.writes(), 0);
    }

    #[tokio::test]
    async fn test_final_import_auth_is_also_rejected() {
        let f = fixture(ScriptedGenerator::redirect("https://b/auth"));
        let job = export_authorized_job().with_import_auth(AuthData::finalized("done"));
        f.store.insert(job.clone()).await.unwrap();

        let result = f.service.begin_import_auth(&token::encode(job.id)).await;
        assert_invalid_state(result, InvalidStateReason::ImportAuthAlreadyPresent);
    }

    #[tokio::test]
    async fn test_preconditions_are_checked_in_order() {
        let f = fixture(ScriptedGenerator::redirect("https://b/auth"));

        // Everything wrong at once: the first check wins
        let mut job = PortabilityJob::new("VIDEOS", "", "");
        job.import_auth_data = Some(AuthData::initial("present"));
        f.store.insert(job.clone()).await.unwrap();
        let result = f.service.begin_import_auth(&token::encode(job.id)).await;
        assert_invalid_state(result, InvalidStateReason::MissingExportService);

        let mut job = PortabilityJob::new("VIDEOS", "A", "");
        job.import_auth_data = Some(AuthData::initial("present"));
        f.store.insert(job.clone()).await.unwrap();
        let result = f.service.begin_import_auth(&token::encode(job.id)).await;
        assert_invalid_state(result, InvalidStateReason::MissingExportAuthData);

        let job = PortabilityJob::new("VIDEOS", "A", "  ")
            .with_export_auth(AuthData::finalized("x"))
            .with_import_auth(AuthData::initial("present"));
        f.store.insert(job.clone()).await.unwrap();
        let result = f.service.begin_import_auth(&token::encode(job.id)).await;
        assert_invalid_state(result, InvalidStateReason::MissingImportService);

        let job = PortabilityJob::new("VIDEOS", "A", "B")
            .with_export_auth(AuthData::finalized("x"))
            .with_import_auth(AuthData::initial("present"));
        f.store.insert(job.clone()).await.unwrap();
        let result = f.service.begin_import_auth(&token::encode(job.id)).await;
        assert_invalid_state(result, InvalidStateReason::ImportAuthAlreadyPresent);

        let job = PortabilityJob::new("VIDEOS", "A", "B").with_export_auth(AuthData::finalized("x"));
        f.store.insert(job.clone()).await.unwrap();
        let result = f.service.begin_import_auth(&token::encode(job.id)).await;
        assert_invalid_state(result, InvalidStateReason::UnknownDataType("VIDEOS".to_string()));

        assert_eq!(f.generator.calls(), 0);
        assert_eq!(f.store.writes(), 0);
    }

    #[tokio::test]
    async fn test_unknown_data_type_never_reaches_registry() {
        // Registered for every known type, so only the parse can reject
        let store = Arc::new(RecordingStore::default());
        let generator = Arc::new(ScriptedGenerator::redirect("https://b/auth"));
        let mut registry = CapabilityRegistry::new();
        for data_type in DataType::ALL {
            registry.register("B", data_type, generator.clone());
        }
        let service = ImportSetupService::new(store.clone(), Arc::new(registry));

        let job = PortabilityJob::new("photos", "A", "B").with_export_auth(AuthData::finalized("x"));
        store.insert(job.clone()).await.unwrap();

        let result = service.begin_import_auth(&token::encode(job.id)).await;
        assert_invalid_state(result, InvalidStateReason::UnknownDataType("photos".to_string()));
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn test_unsupported_capability() {
        let f = fixture(ScriptedGenerator::redirect("https://b/auth").with_initial(json!("t")));
        let job = PortabilityJob::new("CALENDAR", "A", "B").with_export_auth(AuthData::finalized("x"));
        f.store.insert(job.clone()).await.unwrap();

        let result = f.service.begin_import_auth(&token::encode(job.id)).await;

        assert!(matches!(
            result,
            Err(ImportSetupError::UnsupportedCapability { ref service, data_type: DataType::Calendar })
                if service == "B"
        ));
        assert_eq!(f.store.writes(), 0);
        assert_eq!(stored(&f, job.id).await, job);
    }

    #[tokio::test]
    async fn test_generator_failure_leaves_job_unchanged() {
        let f = fixture(ScriptedGenerator::failing());
        let job = export_authorized_job();
        f.store.insert(job.clone()).await.unwrap();

        let result = f.service.begin_import_auth(&token::encode(job.id)).await;

        assert!(matches!(result, Err(ImportSetupError::DownstreamGenerator(_))));
        assert_eq!(f.store.writes(), 0);
        assert_eq!(stored(&f, job.id).await, job);
    }

    #[tokio::test]
    async fn test_store_failure_is_propagated() {
        let mut registry = CapabilityRegistry::new();
        registry.register("B", DataType::Photos, Arc::new(ScriptedGenerator::redirect("https://b/auth")));
        let service = ImportSetupService::new(Arc::new(BrokenStore), Arc::new(registry));

        let result = service.begin_import_auth(&token::encode(Uuid::new_v4())).await;
        assert!(matches!(result, Err(ImportSetupError::Persistence(StoreError::Database(_)))));
    }

    #[tokio::test]
    async fn test_failures_repeat_without_side_effects() {
        let f = fixture(ScriptedGenerator::redirect("https://b/auth"));
        let job = PortabilityJob::new("PHOTOS", "A", "B");
        f.store.insert(job.clone()).await.unwrap();
        let token = token::encode(job.id);

        let first = f.service.begin_import_auth(&token).await.unwrap_err();
        let second = f.service.begin_import_auth(&token).await.unwrap_err();

        assert_eq!(first.to_string(), second.to_string());
        assert!(matches!(
            second,
            ImportSetupError::InvalidJobState {
                reason: InvalidStateReason::MissingExportAuthData,
                ..
            }
        ));
        assert_eq!(stored(&f, job.id).await, job);
    }

    // =========================================================================
    // Repeated and concurrent initiation
    // =========================================================================

    #[tokio::test]
    async fn test_second_initiation_is_rejected() {
        let f = fixture(ScriptedGenerator::redirect("https://b/auth").with_initial(json!("first")));
        let job = export_authorized_job();
        f.store.insert(job.clone()).await.unwrap();
        let token = token::encode(job.id);

        f.service.begin_import_auth(&token).await.unwrap();
        let result = f.service.begin_import_auth(&token).await;

        assert_invalid_state(result, InvalidStateReason::ImportAuthAlreadyPresent);
        assert_eq!(f.generator.calls(), 1);
        assert_eq!(
            stored(&f, job.id).await.import_auth_data,
            Some(AuthData::initial("first"))
        );
    }

    #[tokio::test]
    async fn test_concurrent_initiations_store_once() {
        let barrier = Arc::new(Barrier::new(2));
        let f = fixture(
            ScriptedGenerator::redirect("https://b/auth")
                .with_initial(json!({ "token": "t", "secret": "s" }))
                .waiting_on(barrier),
        );
        let job = export_authorized_job();
        f.store.insert(job.clone()).await.unwrap();
        let token = token::encode(job.id);

        // Both calls pass validation before either persists
        let (a, b) = tokio::join!(
            f.service.begin_import_auth(&token),
            f.service.begin_import_auth(&token)
        );

        assert_eq!(f.generator.calls(), 2);
        let outcomes = [a, b];
        let successes = outcomes.iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 1);
        assert!(outcomes.iter().any(|r| matches!(
            r,
            Err(ImportSetupError::InvalidJobState {
                reason: InvalidStateReason::ImportAuthAlreadyPresent,
                ..
            })
        )));
        assert_eq!(
            stored(&f, job.id).await.import_auth_data,
            Some(AuthData::initial(json!({ "token": "t", "secret": "s" })))
        );
    }

    #[tokio::test]
    async fn test_job_removed_during_generation() {
        struct RemovingStore {
            inner: InMemoryJobStore,
            finds: AtomicUsize,
        }

        #[async_trait]
        impl JobStore for RemovingStore {
            async fn find(&self, id: Uuid) -> Result<Option<PortabilityJob>, StoreError> {
                // Only the first lookup sees the job
                if self.finds.fetch_add(1, Ordering::SeqCst) == 0 {
                    self.inner.find(id).await
                } else {
                    Ok(None)
                }
            }

            async fn insert(&self, job: PortabilityJob) -> Result<(), StoreError> {
                self.inner.insert(job).await
            }

            async fn replace(&self, id: Uuid, job: PortabilityJob) -> Result<(), StoreError> {
                self.inner.replace(id, job).await
            }

            async fn replace_if_phase(
                &self,
                id: Uuid,
                expected: JobPhase,
                job: PortabilityJob,
            ) -> Result<bool, StoreError> {
                self.inner.replace_if_phase(id, expected, job).await
            }
        }

        let store = Arc::new(RemovingStore {
            inner: InMemoryJobStore::new(),
            finds: AtomicUsize::new(0),
        });
        let job = export_authorized_job();
        store.insert(job.clone()).await.unwrap();

        let mut registry = CapabilityRegistry::new();
        registry.register(
            "B",
            DataType::Photos,
            Arc::new(ScriptedGenerator::redirect("https://b/auth").with_initial(json!("t"))),
        );
        let service = ImportSetupService::new(store, Arc::new(registry));

        let result = service.begin_import_auth(&token::encode(job.id)).await;
        assert!(matches!(result, Err(ImportSetupError::JobNotFound(id)) if id == job.id));
    }

    #[test]
    fn test_reason_codes() {
        assert_eq!(
            InvalidStateReason::MissingExportService.code(),
            "missing_export_service"
        );
        assert_eq!(
            InvalidStateReason::UnknownDataType("X".to_string()).code(),
            "unknown_data_type"
        );
        assert_eq!(
            InvalidStateReason::UnknownDataType("X".to_string()).to_string(),
            "unknown data type 'X'"
        );
    }
}
