//! Test fixtures and data for engine tests
//!
//! Consistent schools, records and drafts used across all test suites.

use shared::{
    Availability, Class, ClassId, Lesson, LessonId, NewLesson, NewSubject, Period, Snapshot,
    Subject, SubjectId, Teacher, TeacherId, Weekday,
};

/// Standard test data and fixtures
pub struct TestFixtures;

impl TestFixtures {
    pub const MATH: u32 = 1;
    pub const HISTORY: u32 = 2;

    pub const T1: u32 = 1;
    pub const T2: u32 = 2;

    pub const C1: u32 = 1;
    pub const C2: u32 = 2;

    pub fn subject_id(id: u32) -> SubjectId {
        SubjectId::new(id).unwrap()
    }

    pub fn teacher_id(id: u32) -> TeacherId {
        TeacherId::new(id).unwrap()
    }

    pub fn class_id(id: u32) -> ClassId {
        ClassId::new(id).unwrap()
    }

    pub fn lesson_id(id: u32) -> LessonId {
        LessonId::new(id).unwrap()
    }

    pub fn weekday(day: u8) -> Weekday {
        Weekday::new(day).unwrap()
    }

    pub fn period(period: u8) -> Period {
        Period::new(period).unwrap()
    }

    pub fn subject(id: u32, name: &str) -> Subject {
        Subject {
            id: Self::subject_id(id),
            name: name.to_string(),
            color: "#3B82F6".to_string(),
        }
    }

    pub fn new_subject(name: &str) -> NewSubject {
        NewSubject {
            name: name.to_string(),
            color: "#F59E0B".to_string(),
        }
    }

    /// Teacher available exactly in the listed (weekday, period) slots
    pub fn teacher(id: u32, subjects: &[u32], available: &[(u8, u8)]) -> Teacher {
        Teacher {
            id: Self::teacher_id(id),
            name: format!("Teacher {id}"),
            subject_ids: subjects.iter().map(|&s| Self::subject_id(s)).collect(),
            availability: available
                .iter()
                .map(|&(day, period)| {
                    Availability::new(Self::weekday(day), Self::period(period), true)
                })
                .collect(),
        }
    }

    pub fn class(id: u32) -> Class {
        Class {
            id: Self::class_id(id),
            name: format!("{id}ºA"),
            segment: "Fundamental II".to_string(),
            year_label: format!("{id}º Ano"),
            section: "A".to_string(),
            shift: "Manhã".to_string(),
        }
    }

    pub fn lesson(id: u32, subject: u32, teacher: u32, class: u32, day: u8, period: u8) -> Lesson {
        Lesson {
            id: Self::lesson_id(id),
            subject_id: Self::subject_id(subject),
            teacher_id: Self::teacher_id(teacher),
            class_id: Self::class_id(class),
            weekday: Self::weekday(day),
            period: Self::period(period),
        }
    }

    pub fn new_lesson(subject: u32, teacher: u32, class: u32, day: u8, period: u8) -> NewLesson {
        NewLesson {
            subject_id: Self::subject_id(subject),
            teacher_id: Self::teacher_id(teacher),
            class_id: Self::class_id(class),
            weekday: Self::weekday(day),
            period: Self::period(period),
        }
    }

    /// Two subjects, two teachers, two classes, no lessons.
    ///
    /// T1 teaches math and is available Monday P1-P3; T2 teaches history and is
    /// available Monday P1 and Tuesday P1.
    pub fn small_school() -> Snapshot {
        Snapshot {
            subjects: vec![
                Self::subject(Self::MATH, "Matemática"),
                Self::subject(Self::HISTORY, "História"),
            ],
            teachers: vec![
                Self::teacher(Self::T1, &[Self::MATH], &[(1, 1), (1, 2), (1, 3)]),
                Self::teacher(Self::T2, &[Self::HISTORY], &[(1, 1), (2, 1)]),
            ],
            classes: vec![Self::class(Self::C1), Self::class(Self::C2)],
            lessons: vec![],
            conflicts: vec![],
        }
    }

    /// Small school with a few lessons, one of them double booking T1
    pub fn busy_school() -> Snapshot {
        Snapshot {
            lessons: vec![
                Self::lesson(1, Self::MATH, Self::T1, Self::C1, 1, 1),
                Self::lesson(2, Self::MATH, Self::T1, Self::C2, 1, 1),
                Self::lesson(3, Self::HISTORY, Self::T2, Self::C1, 2, 1),
                Self::lesson(4, Self::HISTORY, Self::T2, Self::C2, 1, 2),
            ],
            ..Self::small_school()
        }
    }
}
