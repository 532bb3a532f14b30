//! Creation payloads: a record without its id
//!
//! Ids are always assigned by the mutation pipeline, so drafts never carry one.

use serde::{Deserialize, Serialize};

use crate::types::{Availability, ClassId, Period, Slot, SubjectId, TeacherId, Weekday};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubject {
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTeacher {
    pub name: String,
    #[serde(default)]
    pub subject_ids: Vec<SubjectId>,
    #[serde(default)]
    pub availability: Vec<Availability>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClass {
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

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLesson {
    pub subject_id: SubjectId,
    pub teacher_id: TeacherId,
    pub class_id: ClassId,
    pub weekday: Weekday,
    pub period: Period,
}

impl NewLesson {
    pub fn slot(&self) -> Slot {
        Slot::new(self.weekday, self.period)
    }
}
