//! Derived conflict records

use serde::{Deserialize, Serialize};
use std::fmt;

use super::entities::Lesson;
use super::ids::LessonId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    /// One teacher holds two or more lessons in the same slot
    TeacherDoubleBooked,
    /// One class has two or more lessons in the same slot
    ClassDoubleBooked,
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictKind::TeacherDoubleBooked => write!(f, "teacher_double_booked"),
            ConflictKind::ClassDoubleBooked => write!(f, "class_double_booked"),
        }
    }
}

/// Two or more lessons sharing a teacher's or a class's slot.
///
/// Never created by hand: conflicts are recomputed from the lessons after every
/// change. The id is derived from the grouping key, so an unchanged clash keeps
/// the same id across recomputations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    pub id: String,
    pub kind: ConflictKind,
    pub description: String,
    pub lessons: Vec<Lesson>,
}

impl Conflict {
    pub fn involves(&self, lesson_id: LessonId) -> bool {
        self.lessons.iter().any(|lesson| lesson.id == lesson_id)
    }

    pub fn lesson_ids(&self) -> impl Iterator<Item = LessonId> + '_ {
        self.lessons.iter().map(|lesson| lesson.id)
    }
}
