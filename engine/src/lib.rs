//! Timetable consistency engine
//!
//! Keeps a school's subjects, teachers, classes and lessons consistent: pure
//! transitions over immutable snapshots, conflict detection after every change,
//! advisory placement validation and cascading deletes. Persistence goes through
//! the `StoreGateway` trait so the storage medium can be swapped or mocked.

pub mod core;
pub mod error;
pub mod services;
pub mod timetable;
pub mod traits;

// Re-export commonly used types
pub use core::{
    CascadeReport, DeleteTarget, EntityStore, GridCell, MutableRecord, Mutation, NewRecord,
    Outcome, Placement, PlacementPolicy, PlacementRejection, RecordChange, StoredRecord, Verdict,
    WeeklyGrid,
};
pub use error::{EngineError, EngineResult};
pub use services::{DEFAULT_DATA_FILE, InMemoryStore, RealJsonStore};
pub use timetable::{EngineConfig, TimetableEngine};
pub use traits::{MockStoreGateway, StoreGateway};
