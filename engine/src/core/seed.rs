//! Default school loaded when the store holds nothing yet

use shared::{
    Availability, Class, EntityId, NewClass, NewSubject, NewTeacher, Period, Snapshot, Subject,
    SubjectId, Teacher, Weekday,
};

use super::pipeline::{Transition, create};
use super::store::EntityStore;
use crate::error::EngineResult;

const SUBJECTS: [(&str, &str); 5] = [
    ("Matemática", "#3B82F6"),
    ("Português", "#10B981"),
    ("História", "#F59E0B"),
    ("Geografia", "#8B5CF6"),
    ("Ciências", "#06B6D4"),
];

/// Five subjects, one teacher with a few declared Monday slots, one class and
/// no lessons
pub fn default_school() -> EngineResult<EntityStore> {
    let mut store = EntityStore::empty();

    for (name, color) in SUBJECTS {
        let Transition { store: next, .. } = create::<Subject>(
            &store,
            NewSubject {
                name: name.to_string(),
                color: color.to_string(),
            },
        )?;
        store = next;
    }

    let availability = [(1, true), (2, true), (3, false)]
        .into_iter()
        .map(|(period, available)| -> EngineResult<Availability> {
            Ok(Availability::new(Weekday::MONDAY, Period::new(period)?, available))
        })
        .collect::<EngineResult<Vec<_>>>()?;

    let Transition { store, .. } = create::<Teacher>(
        &store,
        NewTeacher {
            name: "João Silva".to_string(),
            subject_ids: vec![SubjectId::first()],
            availability,
        },
    )?;

    let Transition { store, .. } = create::<Class>(
        &store,
        NewClass {
            name: "6ºA".to_string(),
            segment: "Fundamental II".to_string(),
            year_label: "6º Ano".to_string(),
            section: "A".to_string(),
            shift: "Manhã".to_string(),
        },
    )?;

    Ok(store)
}

/// Snapshot form of [`default_school`], as persisted on first start
pub fn default_snapshot() -> EngineResult<Snapshot> {
    default_school().map(EntityStore::into_snapshot)
}
