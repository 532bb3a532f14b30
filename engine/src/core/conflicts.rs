//! Conflict detection
//!
//! Groups lessons by (teacher, slot) and by (class, slot); any group holding more
//! than one lesson is a double booking. Runs in one hashing pass per kind and keeps
//! no state between calls.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::hash::Hash;

use shared::{Class, ClassId, Conflict, ConflictKind, Lesson, LessonId, Slot, Teacher, TeacherId};

/// Derive every conflict present in `lessons`.
///
/// Teacher conflicts come first, then class conflicts. Within each kind, groups
/// are ordered by the lesson that opened them and keep their lessons in input
/// order. A pair of lessons clashing on both teacher and class shows up once per
/// kind.
pub fn detect(lessons: &[Lesson], teachers: &[Teacher], classes: &[Class]) -> Vec<Conflict> {
    let teacher_names: HashMap<TeacherId, &str> = teachers
        .iter()
        .map(|teacher| (teacher.id, teacher.name.as_str()))
        .collect();
    let class_names: HashMap<ClassId, &str> = classes
        .iter()
        .map(|class| (class.id, class.name.as_str()))
        .collect();

    let mut conflicts = Vec::new();

    let by_teacher = group_by(lessons, |lesson| (lesson.teacher_id, lesson.slot()));
    for ((teacher_id, slot), group) in by_teacher {
        if group.len() > 1 {
            let name = display_name(teacher_names.get(&teacher_id).copied(), teacher_id.into());
            conflicts.push(Conflict {
                id: conflict_id(ConflictKind::TeacherDoubleBooked, teacher_id.into(), slot),
                kind: ConflictKind::TeacherDoubleBooked,
                description: format!(
                    "Teacher {name} is booked for {} lessons at {slot}",
                    group.len()
                ),
                lessons: group.into_iter().cloned().collect(),
            });
        }
    }

    let by_class = group_by(lessons, |lesson| (lesson.class_id, lesson.slot()));
    for ((class_id, slot), group) in by_class {
        if group.len() > 1 {
            let name = display_name(class_names.get(&class_id).copied(), class_id.into());
            conflicts.push(Conflict {
                id: conflict_id(ConflictKind::ClassDoubleBooked, class_id.into(), slot),
                kind: ConflictKind::ClassDoubleBooked,
                description: format!("Class {name} has {} lessons at {slot}", group.len()),
                lessons: group.into_iter().cloned().collect(),
            });
        }
    }

    conflicts
}

/// Conflicts that include the given lesson
pub fn conflicts_for_lesson(conflicts: &[Conflict], lesson_id: LessonId) -> Vec<&Conflict> {
    conflicts
        .iter()
        .filter(|conflict| conflict.involves(lesson_id))
        .collect()
}

/// Stable id derived from the grouping key, e.g. `teacher-3-1-2`
pub fn conflict_id(kind: ConflictKind, owner: u32, slot: Slot) -> String {
    let prefix = match kind {
        ConflictKind::TeacherDoubleBooked => "teacher",
        ConflictKind::ClassDoubleBooked => "class",
    };
    format!("{prefix}-{owner}-{}-{}", slot.weekday.get(), slot.period.get())
}

fn display_name(name: Option<&str>, id: u32) -> String {
    match name {
        Some(name) => name.to_string(),
        None => format!("#{id}"),
    }
}

/// Group lessons by key, preserving first-encounter order of groups and input
/// order within each group.
fn group_by<'a, K, F>(lessons: &'a [Lesson], key: F) -> Vec<(K, Vec<&'a Lesson>)>
where
    K: Eq + Hash + Copy,
    F: Fn(&Lesson) -> K,
{
    let mut positions: HashMap<K, usize> = HashMap::with_capacity(lessons.len());
    let mut groups: Vec<(K, Vec<&'a Lesson>)> = Vec::new();

    for lesson in lessons {
        let group_key = key(lesson);
        match positions.entry(group_key) {
            Entry::Occupied(entry) => groups[*entry.get()].1.push(lesson),
            Entry::Vacant(entry) => {
                entry.insert(groups.len());
                groups.push((group_key, vec![lesson]));
            }
        }
    }

    groups
}
