//! Scheduling entities: subjects, teachers, classes and lessons

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{ClassId, LessonId, SubjectId, TeacherId};
use super::slot::{Period, Slot, Weekday};

/// The four mutable collections of a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Subject,
    Teacher,
    Class,
    Lesson,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Subject => write!(f, "subject"),
            EntityKind::Teacher => write!(f, "teacher"),
            EntityKind::Class => write!(f, "class"),
            EntityKind::Lesson => write!(f, "lesson"),
        }
    }
}

/// A taught subject, e.g. Mathematics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    /// Display color, usually a `#RRGGBB` string
    pub color: String,
}

/// Whether a teacher may be scheduled into one slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub weekday: Weekday,
    pub period: Period,
    pub available: bool,
}

impl Availability {
    pub fn new(weekday: Weekday, period: Period, available: bool) -> Self {
        Self {
            weekday,
            period,
            available,
        }
    }

    pub fn slot(&self) -> Slot {
        Slot::new(self.weekday, self.period)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: TeacherId,
    pub name: String,
    #[serde(default)]
    pub subject_ids: Vec<SubjectId>,
    /// Declared availability; a slot without an entry counts as unavailable
    #[serde(default)]
    pub availability: Vec<Availability>,
}

impl Teacher {
    pub fn teaches(&self, subject_id: SubjectId) -> bool {
        self.subject_ids.contains(&subject_id)
    }

    /// The first availability entry declared for `slot`, if any
    pub fn availability_at(&self, slot: Slot) -> Option<&Availability> {
        self.availability.iter().find(|entry| entry.slot() == slot)
    }

    pub fn is_available(&self, slot: Slot) -> bool {
        self.availability_at(slot).is_some_and(|entry| entry.available)
    }
}

/// A group of students (turma) that attends lessons together
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    pub id: ClassId,
    pub name: String,
    #[serde(default)]
    pub segment: String,
    #[serde(default)]
    pub year_label: String,
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub shift: String,
}

/// One weekly occurrence of a subject taught by a teacher to a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: LessonId,
    pub subject_id: SubjectId,
    pub teacher_id: TeacherId,
    pub class_id: ClassId,
    pub weekday: Weekday,
    pub period: Period,
}

impl Lesson {
    pub fn slot(&self) -> Slot {
        Slot::new(self.weekday, self.period)
    }
}

/// Any stored record, as returned by create and update operations.
///
/// Serializes as the bare record so transport layers can hand it back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EntityRecord {
    Subject(Subject),
    Teacher(Teacher),
    Class(Class),
    Lesson(Lesson),
}

impl EntityRecord {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityRecord::Subject(_) => EntityKind::Subject,
            EntityRecord::Teacher(_) => EntityKind::Teacher,
            EntityRecord::Class(_) => EntityKind::Class,
            EntityRecord::Lesson(_) => EntityKind::Lesson,
        }
    }

    /// Raw id of the wrapped record
    pub fn raw_id(&self) -> u32 {
        match self {
            EntityRecord::Subject(subject) => subject.id.into(),
            EntityRecord::Teacher(teacher) => teacher.id.into(),
            EntityRecord::Class(class) => class.id.into(),
            EntityRecord::Lesson(lesson) => lesson.id.into(),
        }
    }
}

impl From<Subject> for EntityRecord {
    fn from(subject: Subject) -> Self {
        EntityRecord::Subject(subject)
    }
}

impl From<Teacher> for EntityRecord {
    fn from(teacher: Teacher) -> Self {
        EntityRecord::Teacher(teacher)
    }
}

impl From<Class> for EntityRecord {
    fn from(class: Class) -> Self {
        EntityRecord::Class(class)
    }
}

impl From<Lesson> for EntityRecord {
    fn from(lesson: Lesson) -> Self {
        EntityRecord::Lesson(lesson)
    }
}
