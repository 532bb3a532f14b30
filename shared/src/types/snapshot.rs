//! Whole-school snapshot, the unit loaded from and saved to the store

use serde::{Deserialize, Serialize};

use super::conflict::Conflict;
use super::entities::{Class, Lesson, Subject, Teacher};

/// The complete state of one school at one point in time.
///
/// `conflicts` travels with the snapshot for display purposes only. Whatever a
/// stored or imported document carries there is skipped on read and recomputed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub teachers: Vec<Teacher>,
    #[serde(default)]
    pub classes: Vec<Class>,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
    #[serde(default, skip_deserializing)]
    pub conflicts: Vec<Conflict>,
}

/// Collection sizes, for logs and status endpoints
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotSummary {
    pub subjects: usize,
    pub teachers: usize,
    pub classes: usize,
    pub lessons: usize,
    pub conflicts: usize,
}

impl Snapshot {
    pub fn summary(&self) -> SnapshotSummary {
        SnapshotSummary {
            subjects: self.subjects.len(),
            teachers: self.teachers.len(),
            classes: self.classes.len(),
            lessons: self.lessons.len(),
            conflicts: self.conflicts.len(),
        }
    }
}

impl std::fmt::Display for SnapshotSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} subjects, {} teachers, {} classes, {} lessons, {} conflicts",
            self.subjects, self.teachers, self.classes, self.lessons, self.conflicts
        )
    }
}
