//! Entity store
//!
//! Pure business logic with no I/O dependencies. Holds one consistent snapshot
//! plus id indices for constant-time lookups. A store is never edited in place:
//! the pipeline builds a new snapshot and loads it into a new store.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use shared::{
    Class, ClassId, Conflict, EntityId, Lesson, LessonId, Record, Snapshot, SnapshotSummary,
    Subject, SubjectId, Teacher, TeacherId,
};

use super::conflicts;
use crate::error::{EngineError, EngineResult};

/// One school's consistent state with its derived conflicts
#[derive(Debug, Clone)]
pub struct EntityStore {
    snapshot: Snapshot,
    subject_index: HashMap<SubjectId, usize>,
    teacher_index: HashMap<TeacherId, usize>,
    class_index: HashMap<ClassId, usize>,
    lesson_index: HashMap<LessonId, usize>,
}

impl EntityStore {
    /// Build a store from a snapshot.
    ///
    /// Whatever the snapshot carries in `conflicts` is thrown away and recomputed.
    /// Fails with `MalformedSnapshot` when a collection repeats an id.
    pub fn load(mut snapshot: Snapshot) -> EngineResult<Self> {
        let subject_index = index_records(&snapshot.subjects)?;
        let teacher_index = index_records(&snapshot.teachers)?;
        let class_index = index_records(&snapshot.classes)?;
        let lesson_index = index_records(&snapshot.lessons)?;

        snapshot.conflicts =
            conflicts::detect(&snapshot.lessons, &snapshot.teachers, &snapshot.classes);

        Ok(Self {
            snapshot,
            subject_index,
            teacher_index,
            class_index,
            lesson_index,
        })
    }

    pub fn empty() -> Self {
        Self {
            snapshot: Snapshot::default(),
            subject_index: HashMap::new(),
            teacher_index: HashMap::new(),
            class_index: HashMap::new(),
            lesson_index: HashMap::new(),
        }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn into_snapshot(self) -> Snapshot {
        self.snapshot
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.snapshot.subjects
    }

    pub fn teachers(&self) -> &[Teacher] {
        &self.snapshot.teachers
    }

    pub fn classes(&self) -> &[Class] {
        &self.snapshot.classes
    }

    pub fn lessons(&self) -> &[Lesson] {
        &self.snapshot.lessons
    }

    pub fn conflicts(&self) -> &[Conflict] {
        &self.snapshot.conflicts
    }

    pub fn subject(&self, id: SubjectId) -> Option<&Subject> {
        self.get::<Subject>(id)
    }

    pub fn teacher(&self, id: TeacherId) -> Option<&Teacher> {
        self.get::<Teacher>(id)
    }

    pub fn class(&self, id: ClassId) -> Option<&Class> {
        self.get::<Class>(id)
    }

    pub fn lesson(&self, id: LessonId) -> Option<&Lesson> {
        self.get::<Lesson>(id)
    }

    /// Look up a record of any kind by id
    pub fn get<R: StoredRecord>(&self, id: R::Id) -> Option<&R> {
        R::position(self, id).and_then(|position| R::collection(&self.snapshot).get(position))
    }

    /// Like [`get`](Self::get) but reports a missing record as `NotFound`
    pub fn require<R: StoredRecord>(&self, id: R::Id) -> EngineResult<&R> {
        self.get::<R>(id)
            .ok_or_else(|| EngineError::not_found(R::KIND, id.get()))
    }

    pub fn contains<R: StoredRecord>(&self, id: R::Id) -> bool {
        R::position(self, id).is_some()
    }

    pub fn summary(&self) -> SnapshotSummary {
        self.snapshot.summary()
    }
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::empty()
    }
}

/// A record kind the store keeps an id index for
pub trait StoredRecord: Record {
    fn position(store: &EntityStore, id: Self::Id) -> Option<usize>;
}

impl StoredRecord for Subject {
    fn position(store: &EntityStore, id: SubjectId) -> Option<usize> {
        store.subject_index.get(&id).copied()
    }
}

impl StoredRecord for Teacher {
    fn position(store: &EntityStore, id: TeacherId) -> Option<usize> {
        store.teacher_index.get(&id).copied()
    }
}

impl StoredRecord for Class {
    fn position(store: &EntityStore, id: ClassId) -> Option<usize> {
        store.class_index.get(&id).copied()
    }
}

impl StoredRecord for Lesson {
    fn position(store: &EntityStore, id: LessonId) -> Option<usize> {
        store.lesson_index.get(&id).copied()
    }
}

fn index_records<R: Record>(records: &[R]) -> EngineResult<HashMap<R::Id, usize>> {
    let mut index = HashMap::with_capacity(records.len());
    for (position, record) in records.iter().enumerate() {
        match index.entry(record.id()) {
            Entry::Occupied(_) => {
                return Err(EngineError::malformed(format!(
                    "duplicate {} id {}",
                    R::KIND,
                    record.id()
                )));
            }
            Entry::Vacant(entry) => {
                entry.insert(position);
            }
        }
    }
    Ok(index)
}
