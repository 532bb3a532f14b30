//! Core types used throughout the timetable system

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

pub mod conflict;
pub mod entities;
pub mod ids;
pub mod record;
pub mod slot;
pub mod snapshot;

pub use conflict::{Conflict, ConflictKind};
pub use entities::{Availability, Class, EntityKind, EntityRecord, Lesson, Subject, Teacher};
pub use ids::{ClassId, EntityId, LessonId, SubjectId, TeacherId};
pub use record::{Record, next_id};
pub use slot::{Period, Slot, Weekday};
pub use snapshot::{Snapshot, SnapshotSummary};

/// Global process ID singleton - set once at startup
static PROCESS_ID: OnceLock<ProcessId> = OnceLock::new();

/// Identifies the running component in structured logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessId {
    /// The HTTP server binary
    WebServer,
    /// The engine used as a library (tests, tools)
    Embedded,
}

impl ProcessId {
    /// Initialize the global process ID for the webserver
    pub fn init_webserver() -> &'static ProcessId {
        PROCESS_ID.get_or_init(|| ProcessId::WebServer)
    }

    /// Get the global process ID, defaulting to `Embedded` when nothing was initialized
    pub fn current() -> &'static ProcessId {
        PROCESS_ID.get_or_init(|| ProcessId::Embedded)
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessId::WebServer => write!(f, "webserver"),
            ProcessId::Embedded => write!(f, "embedded"),
        }
    }
}
