//! Portable data types
//!
//! The closed set of data categories a job can move between services.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Category of data being transferred
///
/// Names are matched exactly (upper case) when parsed from a stored job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataType {
    Calendar,
    Contacts,
    Mail,
    Photos,
    Playlists,
    Tasks,
}

impl DataType {
    /// All known data types
    pub const ALL: [DataType; 6] = [
        DataType::Calendar,
        DataType::Contacts,
        DataType::Mail,
        DataType::Photos,
        DataType::Playlists,
        DataType::Tasks,
    ];

    /// Canonical name as stored on a job
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Calendar => "CALENDAR",
            DataType::Contacts => "CONTACTS",
            DataType::Mail => "MAIL",
            DataType::Photos => "PHOTOS",
            DataType::Playlists => "PLAYLISTS",
            DataType::Tasks => "TASKS",
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A data type name outside the known set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown data type: '{0}'")]
pub struct UnknownDataType(pub String);

impl std::str::FromStr for DataType {
    type Err = UnknownDataType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DataType::ALL
            .into_iter()
            .find(|data_type| data_type.as_str() == s)
            .ok_or_else(|| UnknownDataType(s.to_string()))
    }
}
