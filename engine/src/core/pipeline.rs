//! Mutation pipeline
//!
//! The only writer of entity state. Every operation takes the current store by
//! reference and returns a brand new store with conflicts recomputed, leaving
//! the input untouched. Failed operations return an error and no store.

use shared::{
    Class, ClassId, ClassPatch, EntityId, EntityKind, EntityRecord, Lesson, LessonId, LessonPatch,
    NewClass, NewLesson, NewSubject, NewTeacher, Period, Snapshot, SnapshotSummary, Subject,
    SubjectId, SubjectPatch, Teacher, TeacherId, TeacherPatch, Weekday, next_id,
};

use super::cascade::{CascadeReport, DeleteTarget, cascade_delete};
use super::store::{EntityStore, StoredRecord};
use crate::error::{EngineError, EngineResult};

/// A new store together with what the operation produced
#[derive(Debug, Clone)]
pub struct Transition<T> {
    pub store: EntityStore,
    pub output: T,
}

impl<T> Transition<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Transition<U> {
        Transition {
            store: self.store,
            output: f(self.output),
        }
    }
}

/// Append a record built from `draft` under the next free id.
///
/// No referential checks: a lesson may name teachers, classes or subjects that
/// do not exist.
pub fn create<R: StoredRecord>(
    store: &EntityStore,
    draft: R::Draft,
) -> EngineResult<Transition<R>> {
    let id = next_id(R::collection(store.snapshot()))
        .ok_or(EngineError::IdSpaceExhausted { kind: R::KIND })?;
    let record = R::from_draft(id, draft);

    let mut snapshot = store.snapshot().clone();
    R::collection_mut(&mut snapshot).push(record.clone());

    Ok(Transition {
        store: EntityStore::load(snapshot)?,
        output: record,
    })
}

/// Merge `patch` into the record with `id`, keeping its id and position
pub fn update<R: StoredRecord>(
    store: &EntityStore,
    id: R::Id,
    patch: R::Patch,
) -> EngineResult<Transition<R>> {
    let not_found = || EngineError::not_found(R::KIND, id.get());
    let position = R::position(store, id).ok_or_else(not_found)?;

    let mut snapshot = store.snapshot().clone();
    let record = R::collection_mut(&mut snapshot)
        .get_mut(position)
        .ok_or_else(not_found)?;
    record.apply_patch(patch);
    let updated = record.clone();

    Ok(Transition {
        store: EntityStore::load(snapshot)?,
        output: updated,
    })
}

/// Remove a record and its dependents
pub fn delete(
    store: &EntityStore,
    target: DeleteTarget,
) -> EngineResult<Transition<CascadeReport>> {
    let exists = match target {
        DeleteTarget::Subject(id) => store.contains::<Subject>(id),
        DeleteTarget::Teacher(id) => store.contains::<Teacher>(id),
        DeleteTarget::Class(id) => store.contains::<Class>(id),
        DeleteTarget::Lesson(id) => store.contains::<Lesson>(id),
    };
    if !exists {
        return Err(EngineError::not_found(target.kind(), target.raw_id()));
    }

    let (snapshot, report) = cascade_delete(store.snapshot().clone(), target);

    Ok(Transition {
        store: EntityStore::load(snapshot)?,
        output: report,
    })
}

/// Put a lesson into another slot; subject, teacher and class stay as they are
pub fn move_lesson(
    store: &EntityStore,
    id: LessonId,
    weekday: Weekday,
    period: Period,
) -> EngineResult<Transition<Lesson>> {
    let patch = LessonPatch {
        weekday: Some(weekday),
        period: Some(period),
        ..LessonPatch::default()
    };
    update::<Lesson>(store, id, patch)
}

/// Trust `snapshot` wholesale, apart from its conflicts which are recomputed
pub fn replace(snapshot: Snapshot) -> EngineResult<Transition<SnapshotSummary>> {
    let store = EntityStore::load(snapshot)?;
    let summary = store.summary();
    Ok(Transition {
        store,
        output: summary,
    })
}

/// Creation payload of any kind
#[derive(Debug, Clone)]
pub enum NewRecord {
    Subject(NewSubject),
    Teacher(NewTeacher),
    Class(NewClass),
    Lesson(NewLesson),
}

/// Partial update of any kind
#[derive(Debug, Clone)]
pub enum RecordChange {
    Subject(SubjectId, SubjectPatch),
    Teacher(TeacherId, TeacherPatch),
    Class(ClassId, ClassPatch),
    Lesson(LessonId, LessonPatch),
}

/// One logical change to the school
#[derive(Debug, Clone)]
pub enum Mutation {
    Create(NewRecord),
    Update(RecordChange),
    Delete(DeleteTarget),
    MoveLesson {
        id: LessonId,
        weekday: Weekday,
        period: Period,
    },
    Replace(Snapshot),
}

impl Mutation {
    /// Short description for logs, e.g. `delete teacher 3`
    pub fn label(&self) -> String {
        match self {
            Mutation::Create(draft) => format!("create {}", draft.kind()),
            Mutation::Update(change) => format!("update {} {}", change.kind(), change.raw_id()),
            Mutation::Delete(target) => format!("delete {} {}", target.kind(), target.raw_id()),
            Mutation::MoveLesson { id, weekday, period } => {
                format!("move lesson {id} to {weekday} {period}")
            }
            Mutation::Replace(snapshot) => format!("replace ({})", snapshot.summary()),
        }
    }
}

impl NewRecord {
    pub fn kind(&self) -> EntityKind {
        match self {
            NewRecord::Subject(_) => EntityKind::Subject,
            NewRecord::Teacher(_) => EntityKind::Teacher,
            NewRecord::Class(_) => EntityKind::Class,
            NewRecord::Lesson(_) => EntityKind::Lesson,
        }
    }
}

impl RecordChange {
    pub fn kind(&self) -> EntityKind {
        match self {
            RecordChange::Subject(..) => EntityKind::Subject,
            RecordChange::Teacher(..) => EntityKind::Teacher,
            RecordChange::Class(..) => EntityKind::Class,
            RecordChange::Lesson(..) => EntityKind::Lesson,
        }
    }

    pub fn raw_id(&self) -> u32 {
        match self {
            RecordChange::Subject(id, _) => id.get(),
            RecordChange::Teacher(id, _) => id.get(),
            RecordChange::Class(id, _) => id.get(),
            RecordChange::Lesson(id, _) => id.get(),
        }
    }
}

/// What a committed mutation produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Created(EntityRecord),
    Updated(EntityRecord),
    Deleted(CascadeReport),
    Moved(Lesson),
    Replaced(SnapshotSummary),
}

/// Apply any mutation, dispatching to the typed operations above
pub fn apply(store: &EntityStore, mutation: Mutation) -> EngineResult<Transition<Outcome>> {
    match mutation {
        Mutation::Create(draft) => match draft {
            NewRecord::Subject(draft) => created(create::<Subject>(store, draft)?),
            NewRecord::Teacher(draft) => created(create::<Teacher>(store, draft)?),
            NewRecord::Class(draft) => created(create::<Class>(store, draft)?),
            NewRecord::Lesson(draft) => created(create::<Lesson>(store, draft)?),
        },
        Mutation::Update(change) => match change {
            RecordChange::Subject(id, patch) => updated(update::<Subject>(store, id, patch)?),
            RecordChange::Teacher(id, patch) => updated(update::<Teacher>(store, id, patch)?),
            RecordChange::Class(id, patch) => updated(update::<Class>(store, id, patch)?),
            RecordChange::Lesson(id, patch) => updated(update::<Lesson>(store, id, patch)?),
        },
        Mutation::Delete(target) => Ok(delete(store, target)?.map(Outcome::Deleted)),
        Mutation::MoveLesson { id, weekday, period } => {
            Ok(move_lesson(store, id, weekday, period)?.map(Outcome::Moved))
        }
        Mutation::Replace(snapshot) => Ok(replace(snapshot)?.map(Outcome::Replaced)),
    }
}

fn created<R: StoredRecord>(transition: Transition<R>) -> EngineResult<Transition<Outcome>> {
    Ok(transition.map(|record| Outcome::Created(record.into())))
}

fn updated<R: StoredRecord>(transition: Transition<R>) -> EngineResult<Transition<Outcome>> {
    Ok(transition.map(|record| Outcome::Updated(record.into())))
}

/// Builds mutations for one record kind, so callers can stay generic over it
pub trait MutableRecord: StoredRecord {
    fn create_mutation(draft: Self::Draft) -> Mutation;

    fn update_mutation(id: Self::Id, patch: Self::Patch) -> Mutation;

    fn delete_mutation(id: Self::Id) -> Mutation;
}

macro_rules! mutable_record {
    ($record:ident, $id:ident, $draft:ident, $patch:ident) => {
        impl MutableRecord for $record {
            fn create_mutation(draft: $draft) -> Mutation {
                Mutation::Create(NewRecord::$record(draft))
            }

            fn update_mutation(id: $id, patch: $patch) -> Mutation {
                Mutation::Update(RecordChange::$record(id, patch))
            }

            fn delete_mutation(id: $id) -> Mutation {
                Mutation::Delete(DeleteTarget::$record(id))
            }
        }
    };
}

mutable_record!(Subject, SubjectId, NewSubject, SubjectPatch);
mutable_record!(Teacher, TeacherId, NewTeacher, TeacherPatch);
mutable_record!(Class, ClassId, NewClass, ClassPatch);
mutable_record!(Lesson, LessonId, NewLesson, LessonPatch);
