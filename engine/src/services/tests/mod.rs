//! Service-specific tests
//!
//! Each gateway has its own test file with dedicated helpers.


pub mod common {
    use shared::{Snapshot, Subject, SubjectId};

    /// Small snapshot with one subject, enough to tell saves apart
    pub fn snapshot_with_subject(name: &str) -> Snapshot {
        Snapshot {
            subjects: vec![Subject {
                id: SubjectId::new(1).expect("valid test subject id"),
                name: name.to_string(),
                color: "#3B82F6".to_string(),
            }],
            ..Snapshot::default()
        }
    }
}
