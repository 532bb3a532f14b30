//! Partial updates
//!
//! Every field is optional; absent fields keep their current value. A patch body
//! that carries an `id` has it ignored, so record ids never change.

use serde::{Deserialize, Serialize};

use crate::types::{Availability, ClassId, Period, SubjectId, TeacherId, Weekday};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubjectPatch {
    pub name: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeacherPatch {
    pub name: Option<String>,
    pub subject_ids: Option<Vec<SubjectId>>,
    pub availability: Option<Vec<Availability>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClassPatch {
    pub name: Option<String>,
    pub segment: Option<String>,
    pub year_label: Option<String>,
    pub section: Option<String>,
    pub shift: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LessonPatch {
    pub subject_id: Option<SubjectId>,
    pub teacher_id: Option<TeacherId>,
    pub class_id: Option<ClassId>,
    pub weekday: Option<Weekday>,
    pub period: Option<Period>,
}

impl LessonPatch {
    /// True when the patch changes the lesson's placement rather than only its subject
    pub fn touches_placement(&self) -> bool {
        self.teacher_id.is_some()
            || self.class_id.is_some()
            || self.weekday.is_some()
            || self.period.is_some()
    }
}
