//! Weekly grids for one class or one teacher
//!
//! The semantic content of a timetable view: which lessons sit in each of the
//! 30 weekly slots, which conflicts touch them, and for teachers whether the
//! slot is declared available.

use serde::Serialize;

use shared::{
    Class, ClassId, Conflict, EntityId, EntityKind, Lesson, LessonId, Period, Slot, Teacher,
    TeacherId, Weekday,
};

use super::store::EntityStore;
use crate::error::EngineResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridCell {
    pub weekday: Weekday,
    pub period: Period,
    pub lessons: Vec<LessonId>,
    /// Ids of conflicts involving any lesson of the cell
    pub conflicts: Vec<String>,
    /// Teacher grids only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
}

impl GridCell {
    pub fn slot(&self) -> Slot {
        Slot::new(self.weekday, self.period)
    }

    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }
}

/// Five weekdays by six periods, weekday-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyGrid {
    pub owner: EntityKind,
    pub owner_id: u32,
    pub name: String,
    pub cells: Vec<GridCell>,
}

impl WeeklyGrid {
    pub fn cell(&self, slot: Slot) -> Option<&GridCell> {
        let index = usize::from(slot.weekday.get() - 1) * usize::from(Period::COUNT)
            + usize::from(slot.period.get() - 1);
        self.cells.get(index)
    }

    /// Number of slots holding at least one lesson
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }
}

pub fn class_grid(store: &EntityStore, class_id: ClassId) -> EngineResult<WeeklyGrid> {
    let class = store.require::<Class>(class_id)?;
    Ok(build(
        EntityKind::Class,
        class_id.get(),
        &class.name,
        store,
        |lesson| lesson.class_id == class_id,
        |_| None,
    ))
}

pub fn teacher_grid(store: &EntityStore, teacher_id: TeacherId) -> EngineResult<WeeklyGrid> {
    let teacher = store.require::<Teacher>(teacher_id)?;
    Ok(build(
        EntityKind::Teacher,
        teacher_id.get(),
        &teacher.name,
        store,
        |lesson| lesson.teacher_id == teacher_id,
        |slot| Some(teacher.is_available(slot)),
    ))
}

fn build(
    owner: EntityKind,
    owner_id: u32,
    name: &str,
    store: &EntityStore,
    belongs: impl Fn(&Lesson) -> bool,
    available: impl Fn(Slot) -> Option<bool>,
) -> WeeklyGrid {
    let owned: Vec<&Lesson> = store.lessons().iter().filter(|lesson| belongs(lesson)).collect();

    let cells = Slot::week()
        .map(|slot| {
            let lessons: Vec<LessonId> = owned
                .iter()
                .filter(|lesson| lesson.slot() == slot)
                .map(|lesson| lesson.id)
                .collect();
            GridCell {
                weekday: slot.weekday,
                period: slot.period,
                conflicts: touching(store.conflicts(), &lessons),
                lessons,
                available: available(slot),
            }
        })
        .collect();

    WeeklyGrid {
        owner,
        owner_id,
        name: name.to_string(),
        cells,
    }
}

fn touching(conflicts: &[Conflict], lessons: &[LessonId]) -> Vec<String> {
    if lessons.is_empty() {
        return Vec::new();
    }
    conflicts
        .iter()
        .filter(|conflict| lessons.iter().any(|&id| conflict.involves(id)))
        .map(|conflict| conflict.id.clone())
        .collect()
}
