// slskd download events
//
// slskd runs a script after a download completes and hands it the event as
// JSON in the `SLSKD_SCRIPT_DATA` environment variable.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fmt;
use std::path::Path;

/// Environment variable slskd stores the event JSON in
pub const SLSKD_EVENT_ENV_VAR: &str = "SLSKD_SCRIPT_DATA";

/// A download event as emitted by slskd
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlskdEvent {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub event_type: String,
    pub version: u32,
    pub local_directory_name: String,
    #[serde(default)]
    pub remote_directory_name: String,
    #[serde(default)]
    pub username: String,
}

impl SlskdEvent {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Name of the downloaded directory
    pub fn name(&self) -> &str {
        Path::new(&self.local_directory_name)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(&self.local_directory_name)
    }

    pub fn local_directory(&self) -> &Path {
        Path::new(&self.local_directory_name)
    }
}

impl fmt::Display for SlskdEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.event_type, self.name())
    }
}
