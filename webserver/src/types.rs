//! Request and response bodies of the HTTP API
//!
//! Records, snapshots and grids are sent as the engine defines them; only the
//! envelopes specific to HTTP live here.

use serde::{Deserialize, Serialize};

use engine::{CascadeReport, PlacementPolicy};
use shared::{Period, SnapshotSummary, Weekday};

/// Target slot of a move, also used as the query of a move validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    pub weekday: Weekday,
    pub period: Period,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub uptime_seconds: u64,
    /// Mutations committed since start
    pub mutations: u64,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    #[serde(flatten)]
    pub summary: SnapshotSummary,
    pub store: String,
    pub placement_policy: PlacementPolicy,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub removed: CascadeReport,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// File name offered by the export endpoint for a given day
pub fn backup_file_name(date: chrono::NaiveDate) -> String {
    format!("timetable-backup-{}.json", date.format("%Y-%m-%d"))
}
