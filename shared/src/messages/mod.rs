//! Payloads exchanged with the engine
//!
//! Drafts create records, patches update them.

pub mod drafts;
pub mod patches;

pub use drafts::{NewClass, NewLesson, NewSubject, NewTeacher};
pub use patches::{ClassPatch, LessonPatch, SubjectPatch, TeacherPatch};
