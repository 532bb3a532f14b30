//! Placement validation
//!
//! Decides whether a lesson may occupy a slot, given teacher availability and
//! the lessons already placed. Advisory: the pipeline itself never calls it,
//! callers ask before committing (see [`PlacementPolicy`]).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared::{
    ClassId, Lesson, LessonId, NewLesson, Period, Record, Slot, Teacher, TeacherId, Weekday,
};

use super::pipeline::{Mutation, NewRecord, RecordChange};
use super::store::EntityStore;
use crate::error::EngineResult;

/// The facts a placement decision depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub teacher_id: TeacherId,
    pub class_id: ClassId,
    pub weekday: Weekday,
    pub period: Period,
}

impl Placement {
    pub fn slot(&self) -> Slot {
        Slot::new(self.weekday, self.period)
    }

    /// Same teacher and class, another slot
    pub fn moved_to(self, weekday: Weekday, period: Period) -> Self {
        Self {
            weekday,
            period,
            ..self
        }
    }
}

impl From<&NewLesson> for Placement {
    fn from(draft: &NewLesson) -> Self {
        Self {
            teacher_id: draft.teacher_id,
            class_id: draft.class_id,
            weekday: draft.weekday,
            period: draft.period,
        }
    }
}

impl From<&Lesson> for Placement {
    fn from(lesson: &Lesson) -> Self {
        Self {
            teacher_id: lesson.teacher_id,
            class_id: lesson.class_id,
            weekday: lesson.weekday,
            period: lesson.period,
        }
    }
}

/// Why a placement was refused
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlacementRejection {
    #[error("teacher not found")]
    TeacherNotFound { teacher_id: TeacherId },

    #[error("teacher not available at this time")]
    TeacherUnavailable { teacher_id: TeacherId, slot: Slot },

    #[error("teacher already assigned to another class at this time")]
    TeacherDoubleBooked { conflicting_lesson: LessonId },

    #[error("class already has a lesson at this time")]
    ClassDoubleBooked { conflicting_lesson: LessonId },
}

/// Check a candidate placement against teacher availability and current occupancy.
///
/// Rules, first failure wins:
/// 1. the teacher exists
/// 2. the teacher's first availability entry for the slot says available
/// 3. the teacher has no lesson with another class in the slot
/// 4. the class has no lesson with another teacher in the slot
///
/// A lesson identical in teacher and class to the candidate never trips rules 3
/// or 4, so validating a lesson's own placement against a list containing it is
/// harmless.
pub fn validate(
    candidate: &Placement,
    lessons: &[Lesson],
    teachers: &[Teacher],
) -> Result<(), PlacementRejection> {
    let slot = candidate.slot();

    let teacher = teachers
        .iter()
        .find(|teacher| teacher.id == candidate.teacher_id)
        .ok_or(PlacementRejection::TeacherNotFound {
            teacher_id: candidate.teacher_id,
        })?;

    if !teacher.is_available(slot) {
        return Err(PlacementRejection::TeacherUnavailable {
            teacher_id: teacher.id,
            slot,
        });
    }

    if let Some(busy) = lessons.iter().find(|lesson| {
        lesson.teacher_id == candidate.teacher_id
            && lesson.slot() == slot
            && lesson.class_id != candidate.class_id
    }) {
        return Err(PlacementRejection::TeacherDoubleBooked {
            conflicting_lesson: busy.id,
        });
    }

    if let Some(busy) = lessons.iter().find(|lesson| {
        lesson.class_id == candidate.class_id
            && lesson.slot() == slot
            && lesson.teacher_id != candidate.teacher_id
    }) {
        return Err(PlacementRejection::ClassDoubleBooked {
            conflicting_lesson: busy.id,
        });
    }

    Ok(())
}

/// Validate a lesson's placement against every other lesson in the store
pub fn validate_in_store(
    store: &EntityStore,
    candidate: &Placement,
    ignore: Option<LessonId>,
) -> Result<(), PlacementRejection> {
    match ignore {
        Some(id) => {
            let others: Vec<Lesson> = store
                .lessons()
                .iter()
                .filter(|lesson| lesson.id != id)
                .cloned()
                .collect();
            validate(candidate, &others, store.teachers())
        }
        None => validate(candidate, store.lessons(), store.teachers()),
    }
}

/// Would moving lesson `id` to the given slot pass validation?
///
/// Fails with `NotFound` when the lesson does not exist.
pub fn validate_move(
    store: &EntityStore,
    id: LessonId,
    weekday: Weekday,
    period: Period,
) -> EngineResult<Verdict> {
    let lesson = store.require::<Lesson>(id)?;
    let candidate = Placement::from(lesson).moved_to(weekday, period);
    Ok(validate_in_store(store, &candidate, Some(id)).into())
}

/// Transport-friendly form of a validation result: `{ok}` or `{ok, reason}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Verdict {
    pub fn accepted() -> Self {
        Self { ok: true, reason: None }
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            ok: false,
            reason: Some(reason.into()),
        }
    }
}

impl From<Result<(), PlacementRejection>> for Verdict {
    fn from(result: Result<(), PlacementRejection>) -> Self {
        match result {
            Ok(()) => Verdict::accepted(),
            Err(rejection) => Verdict::rejected(rejection.to_string()),
        }
    }
}

/// Whether commits of lesson placements must pass [`validate`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementPolicy {
    /// Commit anything; clashes surface afterwards as conflicts
    #[default]
    Permissive,
    /// Refuse lesson creates, moves and slot updates that fail validation
    Strict,
}

impl PlacementPolicy {
    /// Check `mutation` against the policy before it reaches the pipeline.
    ///
    /// Only lesson creates, moves and updates touching teacher, class or slot are
    /// checked. The moved or updated lesson is left out of the occupancy it is
    /// checked against.
    pub fn check(self, store: &EntityStore, mutation: &Mutation) -> EngineResult<()> {
        if self == PlacementPolicy::Permissive {
            return Ok(());
        }

        match mutation {
            Mutation::Create(NewRecord::Lesson(draft)) => {
                validate_in_store(store, &Placement::from(draft), None)?;
            }
            Mutation::MoveLesson { id, weekday, period } => {
                let lesson = store.require::<Lesson>(*id)?;
                let candidate = Placement::from(lesson).moved_to(*weekday, *period);
                validate_in_store(store, &candidate, Some(*id))?;
            }
            Mutation::Update(RecordChange::Lesson(id, patch)) if patch.touches_placement() => {
                let mut patched = store.require::<Lesson>(*id)?.clone();
                patched.apply_patch(*patch);
                validate_in_store(store, &Placement::from(&patched), Some(*id))?;
            }
            _ => {}
        }

        Ok(())
    }
}
