//! Cascading deletes
//!
//! Removing a record also removes every record that depends on it:
//! - subject: the teachers listing it and the lessons teaching it
//! - teacher: the lessons it teaches
//! - class: the lessons it attends
//! - lesson: nothing else
//!
//! The cascade is one level deep. Lessons of a teacher removed because of a
//! subject delete stay in place unless they teach that subject themselves.

use serde::Serialize;

use shared::{ClassId, EntityKind, Lesson, LessonId, Snapshot, SubjectId, TeacherId};

/// The record a delete starts from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteTarget {
    Subject(SubjectId),
    Teacher(TeacherId),
    Class(ClassId),
    Lesson(LessonId),
}

impl DeleteTarget {
    pub fn kind(&self) -> EntityKind {
        match self {
            DeleteTarget::Subject(_) => EntityKind::Subject,
            DeleteTarget::Teacher(_) => EntityKind::Teacher,
            DeleteTarget::Class(_) => EntityKind::Class,
            DeleteTarget::Lesson(_) => EntityKind::Lesson,
        }
    }

    pub fn raw_id(&self) -> u32 {
        match *self {
            DeleteTarget::Subject(id) => id.into(),
            DeleteTarget::Teacher(id) => id.into(),
            DeleteTarget::Class(id) => id.into(),
            DeleteTarget::Lesson(id) => id.into(),
        }
    }
}

impl From<SubjectId> for DeleteTarget {
    fn from(id: SubjectId) -> Self {
        DeleteTarget::Subject(id)
    }
}

impl From<TeacherId> for DeleteTarget {
    fn from(id: TeacherId) -> Self {
        DeleteTarget::Teacher(id)
    }
}

impl From<ClassId> for DeleteTarget {
    fn from(id: ClassId) -> Self {
        DeleteTarget::Class(id)
    }
}

impl From<LessonId> for DeleteTarget {
    fn from(id: LessonId) -> Self {
        DeleteTarget::Lesson(id)
    }
}

/// Ids of every record a delete removed, the target included
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CascadeReport {
    pub subjects: Vec<SubjectId>,
    pub teachers: Vec<TeacherId>,
    pub classes: Vec<ClassId>,
    pub lessons: Vec<LessonId>,
}

impl CascadeReport {
    pub fn total(&self) -> usize {
        self.subjects.len() + self.teachers.len() + self.classes.len() + self.lessons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Remove `target` and its dependents from `snapshot`.
///
/// A target that does not exist removes nothing and yields an empty report;
/// callers wanting a not-found error check existence first. Conflicts are left
/// untouched and must be recomputed by the caller.
pub fn cascade_delete(mut snapshot: Snapshot, target: DeleteTarget) -> (Snapshot, CascadeReport) {
    let mut report = CascadeReport::default();

    match target {
        DeleteTarget::Subject(id) => {
            report.subjects = ids_of(drain_where(&mut snapshot.subjects, |s| s.id == id), |s| s.id);
            report.teachers =
                ids_of(drain_where(&mut snapshot.teachers, |t| t.teaches(id)), |t| t.id);
            report.lessons = lesson_ids(drain_where(&mut snapshot.lessons, |l| l.subject_id == id));
        }
        DeleteTarget::Teacher(id) => {
            report.teachers = ids_of(drain_where(&mut snapshot.teachers, |t| t.id == id), |t| t.id);
            report.lessons = lesson_ids(drain_where(&mut snapshot.lessons, |l| l.teacher_id == id));
        }
        DeleteTarget::Class(id) => {
            report.classes = ids_of(drain_where(&mut snapshot.classes, |c| c.id == id), |c| c.id);
            report.lessons = lesson_ids(drain_where(&mut snapshot.lessons, |l| l.class_id == id));
        }
        DeleteTarget::Lesson(id) => {
            report.lessons = lesson_ids(drain_where(&mut snapshot.lessons, |l| l.id == id));
        }
    }

    (snapshot, report)
}

/// Split off the records matching `predicate`, keeping the rest in order
fn drain_where<T, F>(records: &mut Vec<T>, predicate: F) -> Vec<T>
where
    F: Fn(&T) -> bool,
{
    let (removed, kept): (Vec<T>, Vec<T>) =
        std::mem::take(records).into_iter().partition(predicate);
    *records = kept;
    removed
}

fn ids_of<T, I>(records: Vec<T>, id: impl Fn(&T) -> I) -> Vec<I> {
    records.iter().map(id).collect()
}

fn lesson_ids(lessons: Vec<Lesson>) -> Vec<LessonId> {
    ids_of(lessons, |lesson| lesson.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Class, Period, Subject, Teacher, Weekday};

    fn school() -> Snapshot {
        let subject = |id: u32| Subject {
            id: SubjectId::new(id).unwrap(),
            name: format!("Subject {id}"),
            color: "#000000".to_string(),
        };
        let teacher = |id: u32, subjects: &[u32]| Teacher {
            id: TeacherId::new(id).unwrap(),
            name: format!("Teacher {id}"),
            subject_ids: subjects.iter().map(|&s| SubjectId::new(s).unwrap()).collect(),
            availability: vec![],
        };
        let class = |id: u32| Class {
            id: ClassId::new(id).unwrap(),
            name: format!("Class {id}"),
            segment: String::new(),
            year_label: String::new(),
            section: String::new(),
            shift: String::new(),
        };
        let lesson = |id: u32, subject: u32, teacher: u32, class: u32, period: u8| Lesson {
            id: LessonId::new(id).unwrap(),
            subject_id: SubjectId::new(subject).unwrap(),
            teacher_id: TeacherId::new(teacher).unwrap(),
            class_id: ClassId::new(class).unwrap(),
            weekday: Weekday::MONDAY,
            period: Period::new(period).unwrap(),
        };

        Snapshot {
            subjects: vec![subject(1), subject(2)],
            teachers: vec![teacher(1, &[1]), teacher(2, &[2]), teacher(3, &[1, 2])],
            classes: vec![class(1), class(2)],
            lessons: vec![
                lesson(1, 1, 1, 1, 1),
                lesson(2, 2, 2, 1, 2),
                lesson(3, 2, 3, 2, 1),
                lesson(4, 1, 3, 2, 2),
            ],
            conflicts: vec![],
        }
    }

    fn raw<I: Into<u32> + Copy>(ids: &[I]) -> Vec<u32> {
        ids.iter().map(|&id| id.into()).collect()
    }

    #[test]
    fn test_subject_delete_cascades_one_level() {
        let (snapshot, report) = cascade_delete(school(), SubjectId::new(1).unwrap().into());

        assert_eq!(raw(&report.subjects), vec![1]);
        assert_eq!(raw(&report.teachers), vec![1, 3]);
        assert_eq!(raw(&report.lessons), vec![1, 4]);
        // Lesson 3 belongs to removed teacher 3 but teaches subject 2
        assert_eq!(raw(&snapshot.lessons.iter().map(|l| l.id).collect::<Vec<_>>()), vec![2, 3]);
        assert_eq!(snapshot.teachers.len(), 1);
    }

    #[test]
    fn test_teacher_delete_removes_its_lessons() {
        let teacher = TeacherId::new(3).unwrap();
        let (snapshot, report) = cascade_delete(school(), teacher.into());

        assert_eq!(raw(&report.teachers), vec![3]);
        assert_eq!(raw(&report.lessons), vec![3, 4]);
        assert!(snapshot.lessons.iter().all(|lesson| lesson.teacher_id != teacher));
        assert_eq!(report.total(), 3);
    }

    #[test]
    fn test_class_delete_removes_its_lessons() {
        let (snapshot, report) = cascade_delete(school(), ClassId::new(1).unwrap().into());

        assert_eq!(raw(&report.classes), vec![1]);
        assert_eq!(raw(&report.lessons), vec![1, 2]);
        assert_eq!(snapshot.classes.len(), 1);
        assert_eq!(snapshot.teachers.len(), 3);
    }

    #[test]
    fn test_lesson_delete_touches_nothing_else() {
        let (snapshot, report) = cascade_delete(school(), LessonId::new(2).unwrap().into());

        assert_eq!(report.total(), 1);
        assert_eq!(snapshot.lessons.len(), 3);
        assert_eq!(snapshot.subjects, school().subjects);
    }

    #[test]
    fn test_missing_target_removes_nothing() {
        let (snapshot, report) = cascade_delete(school(), ClassId::new(9).unwrap().into());

        assert!(report.is_empty());
        assert_eq!(snapshot, school());
    }

    #[test]
    fn test_report_serialization() {
        let (_, report) = cascade_delete(school(), TeacherId::new(1).unwrap().into());
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            serde_json::json!({ "subjects": [], "teachers": [1], "classes": [], "lessons": [1] })
        );
    }
}
