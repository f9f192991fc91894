//! Job domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::auth::AuthData;
use crate::domain::data_type::{DataType, UnknownDataType};

/// A request to move one user's data from an export service to an import service
///
/// Structure shared between the web service (persists and transitions) and
/// clients (display). Treated as an immutable snapshot: transitions produce an
/// updated copy that is written back whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortabilityJob {
    pub id: Uuid,
    /// Raw data type name; checked against [`DataType`] when the job is used
    pub data_type: String,
    pub export_service: String,
    pub import_service: String,
    pub export_auth_data: Option<AuthData>,
    pub import_auth_data: Option<AuthData>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Position of a job in its authorization lifecycle
///
/// Derived from which authorization fields are populated, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobPhase {
    Created,
    ExportAuthorized,
    ImportAuthInitiated,
    ImportAuthorized,
}

impl std::fmt::Display for JobPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobPhase::Created => write!(f, "Created"),
            JobPhase::ExportAuthorized => write!(f, "ExportAuthorized"),
            JobPhase::ImportAuthInitiated => write!(f, "ImportAuthInitiated"),
            JobPhase::ImportAuthorized => write!(f, "ImportAuthorized"),
        }
    }
}

impl PortabilityJob {
    /// Create a job that has not been authorized on either side yet
    pub fn new(
        data_type: impl Into<String>,
        export_service: impl Into<String>,
        import_service: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            data_type: data_type.into(),
            export_service: export_service.into(),
            import_service: import_service.into(),
            export_auth_data: None,
            import_auth_data: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_export_auth(mut self, auth_data: AuthData) -> Self {
        self.export_auth_data = Some(auth_data);
        self
    }

    pub fn with_import_auth(mut self, auth_data: AuthData) -> Self {
        self.import_auth_data = Some(auth_data);
        self
    }

    pub fn phase(&self) -> JobPhase {
        match (&self.export_auth_data, &self.import_auth_data) {
            (None, _) => JobPhase::Created,
            (Some(_), None) => JobPhase::ExportAuthorized,
            (Some(_), Some(AuthData::Initial(_))) => JobPhase::ImportAuthInitiated,
            (Some(_), Some(AuthData::Final(_))) => JobPhase::ImportAuthorized,
        }
    }

    /// Parse the stored data type name
    pub fn parsed_data_type(&self) -> Result<DataType, UnknownDataType> {
        self.data_type.parse()
    }

    /// Copy of this job carrying provisional import handshake state
    pub fn with_initial_import_auth(&self, data: serde_json::Value) -> Self {
        Self {
            import_auth_data: Some(AuthData::Initial(data)),
            updated_at: Utc::now(),
            ..self.clone()
        }
    }
}
