//! Integration tests for the timetable engine facade
//!
//! Commit, persistence, reload and reset through in-memory, file and mocked
//! gateways, including gateway failures.

mod common;

use common::{EngineBuilder, TestFixtures, TestHelpers};
use engine::*;
use shared::{Class, EntityRecord, Lesson, LessonPatch, Subject, SubjectPatch, Teacher};
use tempfile::TempDir;

#[tokio::test]
async fn test_open_seeds_empty_gateway() {
    let engine = TimetableEngine::open(InMemoryStore::new(), EngineConfig::default())
        .await
        .unwrap();

    let summary = engine.summary().await;
    assert_eq!(summary.subjects, 5);
    assert_eq!(summary.teachers, 1);
    assert_eq!(summary.classes, 1);
    assert_eq!(summary.lessons, 0);

    // The seed is persisted right away
    let stored = engine.gateway().stored().expect("seed should be saved");
    assert_eq!(stored.subjects.len(), 5);
    assert_eq!(engine.mutation_count(), 0);
}

#[tokio::test]
async fn test_commit_persists_every_change() {
    let engine = TestHelpers::small_school_engine().await;

    let lesson = TestHelpers::create_lesson(
        &engine,
        TestFixtures::new_lesson(TestFixtures::MATH, TestFixtures::T1, TestFixtures::C1, 1, 1),
    )
    .await;

    assert_eq!(lesson.id, TestFixtures::lesson_id(1));
    assert_eq!(engine.mutation_count(), 1);

    let stored = engine.gateway().stored().unwrap();
    assert_eq!(stored.lessons, vec![lesson]);
}

#[tokio::test]
async fn test_end_to_end_conflict_through_engine() {
    let engine = TestHelpers::small_school_engine().await;

    for class in [TestFixtures::C1, TestFixtures::C2] {
        TestHelpers::create_lesson(
            &engine,
            TestFixtures::new_lesson(TestFixtures::MATH, TestFixtures::T1, class, 1, 1),
        )
        .await;
    }

    let conflicts = engine.conflicts().await;
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].id, "teacher-1-1-1");
    assert_eq!(TestHelpers::conflict_lessons(&conflicts[0]), vec![1, 2]);

    // Stored snapshot carries the derived conflicts too
    assert_eq!(engine.gateway().stored().unwrap().conflicts, conflicts);
}

#[tokio::test]
async fn test_update_and_missing_record() {
    let engine = TestHelpers::small_school_engine().await;

    let outcome = engine
        .commit(Subject::update_mutation(
            TestFixtures::subject_id(TestFixtures::MATH),
            SubjectPatch {
                name: Some("Álgebra".to_string()),
                ..SubjectPatch::default()
            },
        ))
        .await
        .unwrap();
    match outcome {
        Outcome::Updated(EntityRecord::Subject(subject)) => {
            assert_eq!(subject.name, "Álgebra");
            assert_eq!(subject.color, "#3B82F6");
        }
        other => panic!("unexpected outcome: {other:?}"),
    }

    let missing = engine
        .commit(Class::update_mutation(TestFixtures::class_id(42), Default::default()))
        .await;
    assert!(matches!(missing, Err(EngineError::NotFound { id: 42, .. })));
    assert_eq!(engine.mutation_count(), 1);
}

#[tokio::test]
async fn test_subject_delete_cascades_through_engine() {
    let engine = TestHelpers::memory_engine(TestFixtures::busy_school()).await;

    let outcome = engine
        .commit(Subject::delete_mutation(TestFixtures::subject_id(TestFixtures::MATH)))
        .await
        .unwrap();

    let Outcome::Deleted(report) = outcome else {
        panic!("expected a delete report");
    };
    assert_eq!(report.teachers, vec![TestFixtures::teacher_id(TestFixtures::T1)]);
    assert_eq!(report.lessons.len(), 2);

    let snapshot = engine.snapshot().await;
    let math = TestFixtures::subject_id(TestFixtures::MATH);
    assert!(snapshot.lessons.iter().all(|lesson| lesson.subject_id != math));
    assert!(snapshot.conflicts.is_empty());
}

#[tokio::test]
async fn test_validate_and_validate_move() {
    let engine = TestHelpers::memory_engine(TestFixtures::busy_school()).await;

    let verdict = engine
        .validate(&Placement::from(&TestFixtures::new_lesson(
            1,
            TestFixtures::T2,
            TestFixtures::C2,
            2,
            1,
        )))
        .await;
    assert_eq!(
        verdict.reason.as_deref(),
        Some("teacher already assigned to another class at this time")
    );

    let verdict = engine
        .validate_move(
            TestFixtures::lesson_id(2),
            TestFixtures::weekday(1),
            TestFixtures::period(3),
        )
        .await
        .unwrap();
    assert!(verdict.ok);

    let missing = engine
        .validate_move(
            TestFixtures::lesson_id(50),
            TestFixtures::weekday(1),
            TestFixtures::period(3),
        )
        .await;
    assert!(matches!(missing, Err(EngineError::NotFound { .. })));
}

#[tokio::test]
async fn test_strict_policy_refuses_invalid_move() {
    let engine = EngineBuilder::new(TestFixtures::busy_school())
        .strict()
        .with_gateway(|gateway| {
            // Nothing may be saved when the move is refused
            gateway.expect_save().never();
        })
        .open()
        .await;

    let result = engine
        .commit(Mutation::MoveLesson {
            id: TestFixtures::lesson_id(3),
            weekday: TestFixtures::weekday(5),
            period: TestFixtures::period(6),
        })
        .await;

    assert!(matches!(
        result,
        Err(EngineError::ValidationRejected(PlacementRejection::TeacherUnavailable { .. }))
    ));
    assert_eq!(engine.mutation_count(), 0);
}

#[tokio::test]
async fn test_strict_policy_allows_valid_slot_update() {
    let engine = EngineBuilder::new(TestFixtures::busy_school())
        .strict()
        .with_gateway(|gateway| {
            gateway.expect_save().times(1).returning(|_| Ok(()));
        })
        .open()
        .await;

    // Lesson 2 (T1, C2) moves to Monday P2, where T1 is free and available
    let outcome = engine
        .commit(Lesson::update_mutation(
            TestFixtures::lesson_id(2),
            LessonPatch {
                period: Some(TestFixtures::period(2)),
                ..LessonPatch::default()
            },
        ))
        .await;

    // C2 already has lesson 4 with T2 on Monday P2
    assert!(matches!(
        outcome,
        Err(EngineError::ValidationRejected(PlacementRejection::ClassDoubleBooked { .. }))
    ));

    let outcome = engine
        .commit(Mutation::MoveLesson {
            id: TestFixtures::lesson_id(2),
            weekday: TestFixtures::weekday(1),
            period: TestFixtures::period(3),
        })
        .await
        .unwrap();
    assert!(matches!(outcome, Outcome::Moved(_)));
    assert!(engine.conflicts().await.is_empty());
}

#[tokio::test]
async fn test_failed_save_keeps_previous_state() {
    let engine = EngineBuilder::new(TestFixtures::small_school())
        .with_gateway(|gateway| {
            gateway
                .expect_save()
                .returning(|_| Err(EngineError::gateway("save", "disk full")));
        })
        .open()
        .await;

    let result = engine
        .commit(Teacher::delete_mutation(TestFixtures::teacher_id(TestFixtures::T1)))
        .await;

    assert!(matches!(result, Err(EngineError::GatewayFailure { operation: "save", .. })));
    assert_eq!(engine.summary().await.teachers, 2);
    assert_eq!(engine.mutation_count(), 0);
}

#[tokio::test]
async fn test_open_propagates_gateway_failure() {
    let mut gateway = MockStoreGateway::new();
    gateway
        .expect_load()
        .returning(|| Err(EngineError::gateway("load", "connection refused")));

    let result = TimetableEngine::open(gateway, EngineConfig::default()).await;
    assert!(matches!(result, Err(EngineError::GatewayFailure { operation: "load", .. })));
}

#[tokio::test]
async fn test_open_rejects_duplicate_ids() {
    let mut school = TestFixtures::small_school();
    school.classes.push(TestFixtures::class(TestFixtures::C1));

    let result =
        TimetableEngine::open(InMemoryStore::with_snapshot(school), EngineConfig::default()).await;
    assert!(matches!(result, Err(EngineError::MalformedSnapshot { .. })));
}

#[tokio::test]
async fn test_import_replaces_everything() {
    let engine = TestHelpers::small_school_engine().await;

    let outcome = engine
        .commit(Mutation::Replace(TestFixtures::busy_school()))
        .await
        .unwrap();

    assert!(matches!(
        outcome,
        Outcome::Replaced(summary) if summary.lessons == 4 && summary.conflicts == 1
    ));
    assert_eq!(engine.snapshot().await.lessons.len(), 4);
}

#[tokio::test]
async fn test_reload_is_a_full_replacement() {
    let engine = TestHelpers::small_school_engine().await;
    TestHelpers::create_lesson(
        &engine,
        TestFixtures::new_lesson(TestFixtures::MATH, TestFixtures::T1, TestFixtures::C1, 1, 1),
    )
    .await;

    // Someone else rewrites the stored document
    engine.gateway().save(&TestFixtures::busy_school()).await.unwrap();

    let summary = engine.reload().await.unwrap();
    assert_eq!(summary.lessons, 4);
    assert_eq!(summary.conflicts, 1);
    assert_eq!(engine.snapshot().await.lessons, TestFixtures::busy_school().lessons);
}

#[tokio::test]
async fn test_reset_restores_default_school() {
    let engine = TestHelpers::memory_engine(TestFixtures::busy_school()).await;

    let summary = engine.reset().await.unwrap();

    assert_eq!(summary.subjects, 5);
    assert_eq!(summary.lessons, 0);
    assert_eq!(engine.snapshot().await.teachers[0].name, "João Silva");
    assert_eq!(engine.gateway().stored().unwrap().subjects.len(), 5);
}

#[tokio::test]
async fn test_failed_reset_keeps_stored_and_loaded_school() {
    let stored = TestFixtures::small_school();
    let engine = EngineBuilder::new(stored.clone())
        .with_gateway(|gateway| {
            gateway
                .expect_save()
                .times(1)
                .returning(|_| Err(EngineError::gateway("save", "disk full")));
        })
        .open()
        .await;

    let result = engine.reset().await;

    assert!(matches!(result, Err(EngineError::GatewayFailure { operation: "save", .. })));
    assert_eq!(engine.summary().await.subjects, 2);
    assert_eq!(engine.mutation_count(), 0);
    // The stored document was never touched: a reload still finds the old school
    assert_eq!(engine.reload().await.unwrap().teachers, stored.teachers.len());
}

#[tokio::test]
async fn test_reset_overwrites_stored_document() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("timetable.json");
    let engine = TimetableEngine::open(RealJsonStore::with_path(&path), EngineConfig::default())
        .await
        .unwrap();
    TestHelpers::create_lesson(&engine, TestFixtures::new_lesson(1, 1, 1, 1, 1)).await;

    engine.reset().await.unwrap();

    let stored = engine.gateway().load().await.unwrap().unwrap();
    assert!(stored.lessons.is_empty());
    assert_eq!(stored.subjects.len(), 5);
}

#[tokio::test]
async fn test_json_store_round_trip_through_engine() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("timetable.json");

    {
        let engine = TimetableEngine::open(RealJsonStore::with_path(&path), EngineConfig::default())
            .await
            .unwrap();
        TestHelpers::create_lesson(&engine, TestFixtures::new_lesson(1, 1, 1, 1, 1)).await;
        TestHelpers::create_lesson(&engine, TestFixtures::new_lesson(1, 1, 1, 1, 1)).await;
    }

    let reopened = TimetableEngine::open(RealJsonStore::with_path(&path), EngineConfig::default())
        .await
        .unwrap();
    let snapshot = reopened.snapshot().await;

    assert_eq!(snapshot.lessons.len(), 2);
    // Same teacher and class twice in one slot: one conflict of each kind
    assert_eq!(snapshot.conflicts.len(), 2);
}
