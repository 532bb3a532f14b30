//! Uniform access to the four mutable collections

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;

use super::entities::{Class, EntityKind, EntityRecord, Lesson, Subject, Teacher};
use super::ids::{ClassId, EntityId, LessonId, SubjectId, TeacherId};
use super::snapshot::Snapshot;
use crate::messages::{
    ClassPatch, LessonPatch, NewClass, NewLesson, NewSubject, NewTeacher, SubjectPatch,
    TeacherPatch,
};

/// A record stored in one of the snapshot's id-keyed collections.
///
/// Lets the pipeline create, merge and look up records of any kind with one
/// implementation instead of one per collection.
pub trait Record:
    Clone + fmt::Debug + Serialize + DeserializeOwned + Into<EntityRecord> + Send + Sync + 'static
{
    type Id: EntityId + Serialize + DeserializeOwned;
    type Draft: fmt::Debug + Clone + DeserializeOwned + Send + 'static;
    type Patch: fmt::Debug + Clone + Default + DeserializeOwned + Send + 'static;

    const KIND: EntityKind;

    fn id(&self) -> Self::Id;

    fn from_draft(id: Self::Id, draft: Self::Draft) -> Self;

    /// Overwrite the fields present in `patch`, keeping the id
    fn apply_patch(&mut self, patch: Self::Patch);

    fn collection(snapshot: &Snapshot) -> &[Self];

    fn collection_mut(snapshot: &mut Snapshot) -> &mut Vec<Self>;
}

impl Record for Subject {
    type Id = SubjectId;
    type Draft = NewSubject;
    type Patch = SubjectPatch;

    const KIND: EntityKind = EntityKind::Subject;

    fn id(&self) -> SubjectId {
        self.id
    }

    fn from_draft(id: SubjectId, draft: NewSubject) -> Self {
        Self {
            id,
            name: draft.name,
            color: draft.color,
        }
    }

    fn apply_patch(&mut self, patch: SubjectPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
    }

    fn collection(snapshot: &Snapshot) -> &[Self] {
        &snapshot.subjects
    }

    fn collection_mut(snapshot: &mut Snapshot) -> &mut Vec<Self> {
        &mut snapshot.subjects
    }
}

impl Record for Teacher {
    type Id = TeacherId;
    type Draft = NewTeacher;
    type Patch = TeacherPatch;

    const KIND: EntityKind = EntityKind::Teacher;

    fn id(&self) -> TeacherId {
        self.id
    }

    fn from_draft(id: TeacherId, draft: NewTeacher) -> Self {
        Self {
            id,
            name: draft.name,
            subject_ids: draft.subject_ids,
            availability: draft.availability,
        }
    }

    fn apply_patch(&mut self, patch: TeacherPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(subject_ids) = patch.subject_ids {
            self.subject_ids = subject_ids;
        }
        if let Some(availability) = patch.availability {
            self.availability = availability;
        }
    }

    fn collection(snapshot: &Snapshot) -> &[Self] {
        &snapshot.teachers
    }

    fn collection_mut(snapshot: &mut Snapshot) -> &mut Vec<Self> {
        &mut snapshot.teachers
    }
}

impl Record for Class {
    type Id = ClassId;
    type Draft = NewClass;
    type Patch = ClassPatch;

    const KIND: EntityKind = EntityKind::Class;

    fn id(&self) -> ClassId {
        self.id
    }

    fn from_draft(id: ClassId, draft: NewClass) -> Self {
        Self {
            id,
            name: draft.name,
            segment: draft.segment,
            year_label: draft.year_label,
            section: draft.section,
            shift: draft.shift,
        }
    }

    fn apply_patch(&mut self, patch: ClassPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(segment) = patch.segment {
            self.segment = segment;
        }
        if let Some(year_label) = patch.year_label {
            self.year_label = year_label;
        }
        if let Some(section) = patch.section {
            self.section = section;
        }
        if let Some(shift) = patch.shift {
            self.shift = shift;
        }
    }

    fn collection(snapshot: &Snapshot) -> &[Self] {
        &snapshot.classes
    }

    fn collection_mut(snapshot: &mut Snapshot) -> &mut Vec<Self> {
        &mut snapshot.classes
    }
}

impl Record for Lesson {
    type Id = LessonId;
    type Draft = NewLesson;
    type Patch = LessonPatch;

    const KIND: EntityKind = EntityKind::Lesson;

    fn id(&self) -> LessonId {
        self.id
    }

    fn from_draft(id: LessonId, draft: NewLesson) -> Self {
        Self {
            id,
            subject_id: draft.subject_id,
            teacher_id: draft.teacher_id,
            class_id: draft.class_id,
            weekday: draft.weekday,
            period: draft.period,
        }
    }

    fn apply_patch(&mut self, patch: LessonPatch) {
        if let Some(subject_id) = patch.subject_id {
            self.subject_id = subject_id;
        }
        if let Some(teacher_id) = patch.teacher_id {
            self.teacher_id = teacher_id;
        }
        if let Some(class_id) = patch.class_id {
            self.class_id = class_id;
        }
        if let Some(weekday) = patch.weekday {
            self.weekday = weekday;
        }
        if let Some(period) = patch.period {
            self.period = period;
        }
    }

    fn collection(snapshot: &Snapshot) -> &[Self] {
        &snapshot.lessons
    }

    fn collection_mut(snapshot: &mut Snapshot) -> &mut Vec<Self> {
        &mut snapshot.lessons
    }
}

/// Id to give the next record appended to `records`: `max + 1`, or the first id
/// when the collection is empty. `None` once the id space is exhausted.
pub fn next_id<R: Record>(records: &[R]) -> Option<R::Id> {
    match records.iter().map(Record::id).max() {
        Some(max) => max.successor(),
        None => Some(R::Id::first()),
    }
}
