//! Core business logic - pure functions, no I/O dependencies

pub mod cascade;
pub mod conflicts;
pub mod grid;
pub mod pipeline;
pub mod placement;
pub mod seed;
pub mod store;

pub use cascade::{CascadeReport, DeleteTarget, cascade_delete};
pub use conflicts::{conflicts_for_lesson, detect};
pub use grid::{GridCell, WeeklyGrid, class_grid, teacher_grid};
pub use pipeline::{MutableRecord, Mutation, NewRecord, Outcome, RecordChange, Transition, apply};
pub use placement::{
    Placement, PlacementPolicy, PlacementRejection, Verdict, validate, validate_in_store,
    validate_move,
};
pub use seed::{default_school, default_snapshot};
pub use store::{EntityStore, StoredRecord};
