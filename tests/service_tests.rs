use sisdesk::config::Config;
use sisdesk::models::student::{GENDER_FEMALE, GENDER_MALE, RosterQuery, StudentInput, UpsertOutcome};
use sisdesk::services::{AuthError, StudentError};
use sisdesk::state::SharedState;

/// A single pooled connection keeps every query on the same in-memory database.
fn test_config() -> Config {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.general.max_db_connections = 1;
    config.general.min_db_connections = 1;
    config.security.argon2_memory_cost_kib = 64;
    config.security.argon2_time_cost = 1;
    config
}

async fn spawn_state() -> SharedState {
    SharedState::new(test_config())
        .await
        .expect("Failed to create shared state")
}

fn student(name: &str, matric_no: &str, gender: &str) -> StudentInput {
    StudentInput {
        name: name.to_string(),
        matric_no: matric_no.to_string(),
        gender: gender.to_string(),
        ..StudentInput::default()
    }
}

async fn add(state: &SharedState, input: StudentInput) -> i32 {
    match state.student_service.upsert(input).await.unwrap() {
        UpsertOutcome::Created { id } => id,
        other => panic!("expected insert, got {other:?}"),
    }
}

#[tokio::test]
async fn test_register_then_login() {
    let state = spawn_state().await;

    let id = state.auth_service.register("  admin ", "hunter2").await.unwrap();
    assert!(id > 0);
    assert_eq!(state.store.user_count().await.unwrap(), 1);

    let user = state.auth_service.login("admin", "hunter2").await.unwrap();
    assert_eq!(user.id, id);
    assert_eq!(user.username, "admin");
    assert_eq!(user.role, "admin");
}

#[tokio::test]
async fn test_register_duplicate_username_conflicts() {
    let state = spawn_state().await;

    state.auth_service.register("admin", "first").await.unwrap();
    let err = state
        .auth_service
        .register("admin", "second")
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::Conflict));
    assert_eq!(state.store.user_count().await.unwrap(), 1);

    // The first password still works.
    assert!(state.auth_service.login("admin", "first").await.is_ok());
}

#[tokio::test]
async fn test_register_requires_both_fields() {
    let state = spawn_state().await;

    let err = state.auth_service.register("   ", "pw").await.unwrap_err();
    assert!(matches!(err, AuthError::Validation(_)));

    let err = state.auth_service.register("admin", "").await.unwrap_err();
    assert!(matches!(err, AuthError::Validation(_)));

    assert_eq!(state.store.user_count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let state = spawn_state().await;
    state.auth_service.register("admin", "secret").await.unwrap();

    let wrong_password = state.auth_service.login("admin", "nope").await.unwrap_err();
    let unknown_user = state.auth_service.login("ghost", "secret").await.unwrap_err();

    assert!(matches!(wrong_password, AuthError::InvalidCredentials));
    assert!(matches!(unknown_user, AuthError::InvalidCredentials));
    assert_eq!(wrong_password.to_string(), unknown_user.to_string());
}

#[tokio::test]
async fn test_new_record_is_listed_first() {
    let state = spawn_state().await;

    add(&state, student("Ada Lovelace", "MAT/001", GENDER_FEMALE)).await;
    let newest = add(&state, student("Alan Turing", "MAT/002", GENDER_MALE)).await;

    let page = state
        .student_service
        .list(&RosterQuery::new(None, None, 1, 10))
        .await
        .unwrap();

    assert_eq!(page.total, 2);
    assert_eq!(page.records[0].id, newest);
    assert_eq!(page.records[0].name, "Alan Turing");
}

#[tokio::test]
async fn test_empty_optional_fields_are_stored_as_null() {
    let state = spawn_state().await;

    let id = add(
        &state,
        StudentInput {
            department: "  ".to_string(),
            faculty: " Science ".to_string(),
            ..student(" Grace Hopper ", " MAT/100 ", "")
        },
    )
    .await;

    let stored = state.store.get_student(id).await.unwrap().unwrap();
    assert_eq!(stored.name, "Grace Hopper");
    assert_eq!(stored.matric_no, "MAT/100");
    assert_eq!(stored.department, None);
    assert_eq!(stored.gender, None);
    assert_eq!(stored.faculty.as_deref(), Some("Science"));
}

#[tokio::test]
async fn test_upsert_requires_name_and_matric() {
    let state = spawn_state().await;

    let err = state
        .student_service
        .upsert(student("", "MAT/001", GENDER_MALE))
        .await
        .unwrap_err();
    assert!(matches!(err, StudentError::Validation(_)));

    let err = state
        .student_service
        .upsert(student("Ada", "   ", GENDER_FEMALE))
        .await
        .unwrap_err();
    assert!(matches!(err, StudentError::Validation(_)));

    assert_eq!(state.store.student_count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_duplicate_matric_conflicts() {
    let state = spawn_state().await;

    add(&state, student("Ada", "MAT/001", GENDER_FEMALE)).await;
    let err = state
        .student_service
        .upsert(student("Someone Else", "MAT/001", GENDER_MALE))
        .await
        .unwrap_err();

    assert!(matches!(err, StudentError::Conflict));
    assert_eq!(state.store.student_count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_update_into_taken_matric_changes_nothing() {
    let state = spawn_state().await;

    let first = add(&state, student("Ada", "MAT/001", GENDER_FEMALE)).await;
    let second = add(&state, student("Alan", "MAT/002", GENDER_MALE)).await;

    let err = state
        .student_service
        .upsert(StudentInput {
            id: Some(second),
            ..student("Alan Renamed", "MAT/001", GENDER_MALE)
        })
        .await
        .unwrap_err();
    assert!(matches!(err, StudentError::Conflict));

    let a = state.store.get_student(first).await.unwrap().unwrap();
    let b = state.store.get_student(second).await.unwrap().unwrap();
    assert_eq!((a.name.as_str(), a.matric_no.as_str()), ("Ada", "MAT/001"));
    assert_eq!((b.name.as_str(), b.matric_no.as_str()), ("Alan", "MAT/002"));
}

#[tokio::test]
async fn test_update_existing_and_missing_records() {
    let state = spawn_state().await;
    let id = add(&state, student("Ada", "MAT/001", GENDER_FEMALE)).await;

    let outcome = state
        .student_service
        .upsert(StudentInput {
            id: Some(id),
            level: "400".to_string(),
            ..student("Ada King", "MAT/001", GENDER_FEMALE)
        })
        .await
        .unwrap();
    assert_eq!(outcome, UpsertOutcome::Updated { id, matched: true });

    let stored = state.store.get_student(id).await.unwrap().unwrap();
    assert_eq!(stored.name, "Ada King");
    assert_eq!(stored.level.as_deref(), Some("400"));

    let outcome = state
        .student_service
        .upsert(StudentInput {
            id: Some(9999),
            ..student("Nobody", "MAT/999", GENDER_MALE)
        })
        .await
        .unwrap();
    assert_eq!(
        outcome,
        UpsertOutcome::Updated {
            id: 9999,
            matched: false
        }
    );
    assert_eq!(state.store.student_count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_delete_existing_and_missing() {
    let state = spawn_state().await;
    let id = add(&state, student("Ada", "MAT/001", GENDER_FEMALE)).await;

    assert!(!state.student_service.delete(id + 100).await.unwrap());
    assert_eq!(state.store.student_count().await.unwrap(), 1);

    assert!(state.student_service.delete(id).await.unwrap());
    assert_eq!(state.store.student_count().await.unwrap(), 0);
    assert!(state.store.get_student(id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_pagination_over_25_records() {
    let state = spawn_state().await;
    for i in 1..=25 {
        add(&state, student(&format!("Student {i}"), &format!("MAT/{i:03}"), GENDER_MALE)).await;
    }

    let first = state
        .student_service
        .list(&RosterQuery::new(None, None, 1, 10))
        .await
        .unwrap();
    assert_eq!(first.records.len(), 10);
    assert_eq!(first.total, 25);
    assert_eq!(first.total_pages, 3);
    assert_eq!(first.records[0].matric_no, "MAT/025");

    let last = state
        .student_service
        .list(&RosterQuery::new(None, None, 3, 10))
        .await
        .unwrap();
    assert_eq!(last.records.len(), 5);
    assert_eq!(last.records[4].matric_no, "MAT/001");

    let beyond = state
        .student_service
        .list(&RosterQuery::new(None, None, 9, 10))
        .await
        .unwrap();
    assert!(beyond.records.is_empty());
    assert_eq!(beyond.total, 25);
}

#[tokio::test]
async fn test_zero_page_size_yields_single_empty_page() {
    let state = spawn_state().await;
    add(&state, student("Ada", "MAT/001", GENDER_FEMALE)).await;

    let page = state
        .student_service
        .list(&RosterQuery::new(None, None, 1, 0))
        .await
        .unwrap();

    assert!(page.records.is_empty());
    assert_eq!(page.total, 1);
    assert_eq!(page.total_pages, 1);
}

#[tokio::test]
async fn test_pages_past_the_addressable_range_are_empty() {
    let state = spawn_state().await;
    add(&state, student("Ada", "MAT/001", GENDER_FEMALE)).await;

    for query in [
        RosterQuery::new(None, None, u64::MAX, 10),
        RosterQuery::new(None, None, u64::MAX / 2, 100),
        RosterQuery::new(None, None, 2, u64::MAX),
    ] {
        let page = state.student_service.list(&query).await.unwrap();
        assert!(page.records.is_empty());
        assert_eq!(page.total, 1);
        assert_eq!(page.stats.female, 1);
    }
}

#[tokio::test]
async fn test_search_and_gender_filter_leave_stats_alone() {
    let state = spawn_state().await;

    add(
        &state,
        StudentInput {
            department: "Computer Science".to_string(),
            faculty: "Science".to_string(),
            ..student("Ada Lovelace", "MAT/001", GENDER_FEMALE)
        },
    )
    .await;
    add(
        &state,
        StudentInput {
            department: "Mathematics".to_string(),
            faculty: "Science".to_string(),
            ..student("Alan Turing", "MAT/002", GENDER_MALE)
        },
    )
    .await;
    add(
        &state,
        StudentInput {
            department: "History".to_string(),
            faculty: "Arts".to_string(),
            ..student("Mary Beard", "MAT/003", GENDER_FEMALE)
        },
    )
    .await;

    let females = state
        .student_service
        .list(&RosterQuery::new(None, Some(GENDER_FEMALE), 1, 10))
        .await
        .unwrap();
    assert_eq!(females.total, 2);
    assert!(
        females
            .records
            .iter()
            .all(|s| s.gender.as_deref() == Some(GENDER_FEMALE))
    );

    let search = state
        .student_service
        .list(&RosterQuery::new(Some("science"), None, 1, 10))
        .await
        .unwrap();
    assert_eq!(search.total, 2);

    let combined = state
        .student_service
        .list(&RosterQuery::new(Some("science"), Some(GENDER_MALE), 1, 10))
        .await
        .unwrap();
    assert_eq!(combined.total, 1);
    assert_eq!(combined.records[0].name, "Alan Turing");

    for page in [&females, &search, &combined] {
        assert_eq!(page.stats.departments, 3);
        assert_eq!(page.stats.faculties, 2);
        assert_eq!(page.stats.male, 1);
        assert_eq!(page.stats.female, 2);
    }
}

#[tokio::test]
async fn test_search_matches_matric_number() {
    let state = spawn_state().await;
    add(&state, student("Ada", "CSC/2020/001", GENDER_FEMALE)).await;
    add(&state, student("Alan", "MTH/2020/002", GENDER_MALE)).await;

    let page = state
        .student_service
        .list(&RosterQuery::new(Some("csc/2020"), None, 1, 10))
        .await
        .unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.records[0].name, "Ada");
}
