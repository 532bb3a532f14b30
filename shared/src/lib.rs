//! Shared types for the school timetable system
//!
//! Holds the scheduling data model (subjects, teachers, classes, lessons,
//! derived conflicts and whole-school snapshots), the payloads used to create
//! and update records, and the logging setup shared by every component.

pub mod errors;
pub mod logging;
pub mod messages;
pub mod types;

pub use errors::*;
pub use types::*;

pub use messages::{
    // Creation payloads
    NewClass, NewLesson, NewSubject, NewTeacher,

    // Partial updates
    ClassPatch, LessonPatch, SubjectPatch, TeacherPatch,
};
