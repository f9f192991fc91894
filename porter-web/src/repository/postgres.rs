//! PostgreSQL job store
//!
//! Handles all database operations related to portability jobs.

use async_trait::async_trait;
use porter_core::domain::auth::AuthData;
use porter_core::domain::job::{JobPhase, PortabilityJob};
use sqlx::PgPool;
use uuid::Uuid;

use super::job::{JobStore, StoreError, ensure_same_id};

/// Job store backed by the `portability_jobs` table
#[derive(Clone)]
pub struct PgJobStore {
    pool: PgPool,
}

impl PgJobStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobStore for PgJobStore {
    async fn find(&self, id: Uuid) -> Result<Option<PortabilityJob>, StoreError> {
        let row = sqlx::query_as::<_, JobRow>(
            r#"
            SELECT id, data_type, export_service, import_service,
                   export_auth_data, import_auth_data, created_at, updated_at
            FROM portability_jobs
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(PortabilityJob::try_from).transpose()
    }

    async fn insert(&self, job: PortabilityJob) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO portability_jobs
                (id, data_type, export_service, import_service,
                 export_auth_data, import_auth_data, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(job.id)
        .bind(&job.data_type)
        .bind(&job.export_service)
        .bind(&job.import_service)
        .bind(auth_to_json(&job.export_auth_data)?)
        .bind(auth_to_json(&job.import_auth_data)?)
        .bind(job.created_at)
        .bind(job.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::AlreadyExists(job.id));
        }
        Ok(())
    }

    async fn replace(&self, id: Uuid, job: PortabilityJob) -> Result<(), StoreError> {
        ensure_same_id(id, &job)?;

        let rows = update(&self.pool, &job, None).await?;
        if rows == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    async fn replace_if_phase(
        &self,
        id: Uuid,
        expected: JobPhase,
        job: PortabilityJob,
    ) -> Result<bool, StoreError> {
        ensure_same_id(id, &job)?;

        if update(&self.pool, &job, Some(expected)).await? > 0 {
            return Ok(true);
        }

        // Nothing matched: either the phase moved or the job is gone
        if self.find(id).await?.is_none() {
            return Err(StoreError::NotFound(id));
        }
        Ok(false)
    }
}

/// Overwrite all mutable columns, optionally guarded by the stored phase
async fn update(
    pool: &PgPool,
    job: &PortabilityJob,
    expected: Option<JobPhase>,
) -> Result<u64, StoreError> {
    let guard = expected
        .map(|phase| format!(" AND {}", phase_condition(phase)))
        .unwrap_or_default();

    let query = format!(
        r#"
        UPDATE portability_jobs
        SET data_type = $1, export_service = $2, import_service = $3,
            export_auth_data = $4, import_auth_data = $5, updated_at = $6
        WHERE id = $7{guard}
        "#
    );

    let result = sqlx::query(&query)
        .bind(&job.data_type)
        .bind(&job.export_service)
        .bind(&job.import_service)
        .bind(auth_to_json(&job.export_auth_data)?)
        .bind(auth_to_json(&job.import_auth_data)?)
        .bind(job.updated_at)
        .bind(job.id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

// =============================================================================
// Helper Functions
// =============================================================================

/// SQL predicate matching rows whose derived phase is `phase`
fn phase_condition(phase: JobPhase) -> &'static str {
    match phase {
        JobPhase::Created => "export_auth_data IS NULL",
        JobPhase::ExportAuthorized => {
            "export_auth_data IS NOT NULL AND import_auth_data IS NULL"
        }
        JobPhase::ImportAuthInitiated => {
            "export_auth_data IS NOT NULL AND import_auth_data->>'stage' = 'initial'"
        }
        JobPhase::ImportAuthorized => {
            "export_auth_data IS NOT NULL AND import_auth_data->>'stage' = 'final'"
        }
    }
}

fn auth_to_json(auth: &Option<AuthData>) -> Result<Option<serde_json::Value>, StoreError> {
    auth.as_ref()
        .map(serde_json::to_value)
        .transpose()
        .map_err(StoreError::from)
}

fn auth_from_json(value: Option<serde_json::Value>) -> Result<Option<AuthData>, StoreError> {
    value
        .map(serde_json::from_value)
        .transpose()
        .map_err(StoreError::from)
}

// =============================================================================
// Database Row Types
// =============================================================================

#[derive(sqlx::FromRow)]
struct JobRow {
    id: Uuid,
    data_type: String,
    export_service: String,
    import_service: String,
    export_auth_data: Option<serde_json::Value>,
    import_auth_data: Option<serde_json::Value>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<JobRow> for PortabilityJob {
    type Error = StoreError;

    fn try_from(row: JobRow) -> Result<Self, Self::Error> {
        Ok(PortabilityJob {
            id: row.id,
            data_type: row.data_type,
            export_service: row.export_service,
            import_service: row.import_service,
            export_auth_data: auth_from_json(row.export_auth_data)?,
            import_auth_data: auth_from_json(row.import_auth_data)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_phase_conditions_are_distinct() {
        let conditions = [
            phase_condition(JobPhase::Created),
            phase_condition(JobPhase::ExportAuthorized),
            phase_condition(JobPhase::ImportAuthInitiated),
            phase_condition(JobPhase::ImportAuthorized),
        ];
        for (i, a) in conditions.iter().enumerate() {
            for b in &conditions[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(phase_condition(JobPhase::ImportAuthInitiated).contains("'initial'"));
    }

    #[test]
    fn test_row_conversion() {
        let now = chrono::Utc::now();
        let row = JobRow {
            id: Uuid::new_v4(),
            data_type: "PHOTOS".to_string(),
            export_service: "A".to_string(),
            import_service: "B".to_string(),
            export_auth_data: Some(json!({ "stage": "final", "data": "x" })),
            import_auth_data: None,
            created_at: now,
            updated_at: now,
        };

        let job = PortabilityJob::try_from(row).unwrap();
        assert_eq!(job.export_auth_data, Some(AuthData::finalized("x")));
        assert_eq!(job.phase(), JobPhase::ExportAuthorized);
    }

    #[test]
    fn test_row_with_corrupt_auth_data() {
        let now = chrono::Utc::now();
        let row = JobRow {
            id: Uuid::new_v4(),
            data_type: "PHOTOS".to_string(),
            export_service: "A".to_string(),
            import_service: "B".to_string(),
            export_auth_data: Some(json!("not tagged")),
            import_auth_data: None,
            created_at: now,
            updated_at: now,
        };

        let err = PortabilityJob::try_from(row).unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
    }
}
