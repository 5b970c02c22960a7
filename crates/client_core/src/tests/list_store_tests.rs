use super::*;

fn student(id: i64, name: &str) -> Student {
    Student {
        id: StudentId::from(id),
        student_code: format!("SV{id:02}"),
        full_name: name.to_string(),
        email: None,
        dob: None,
        class_name: None,
    }
}

#[test]
fn starts_empty_and_idle() {
    let store = ListStore::new();
    assert!(store.records().is_empty());
    assert!(!store.is_loading());
    assert_eq!(store.realized_query(), None);
}

#[test]
fn successful_refresh_replaces_snapshot() {
    let mut store = ListStore::new();
    let ticket = store.begin_refresh("ng");
    assert!(store.is_loading());

    let outcome = store.complete_refresh(ticket, Ok(vec![student(1, "Nguyen A")]));
    assert_eq!(outcome, RefreshOutcome::Applied { count: 1 });
    assert!(!store.is_loading());
    assert_eq!(store.realized_query(), Some("ng"));
    assert_eq!(store.records()[0].full_name, "Nguyen A");
    assert!(store.find(&StudentId::from(1)).is_some());
    assert!(store.find(&StudentId::from(2)).is_none());
}

#[test]
fn failed_refresh_keeps_previous_records_visible() {
    let mut store = ListStore::new();
    let ticket = store.begin_refresh("");
    store.complete_refresh(ticket, Ok(vec![student(1, "Nguyen A"), student(2, "Tran B")]));

    let ticket = store.begin_refresh("tr");
    let outcome = store.complete_refresh(ticket, Err(ClientError::remote(500, "db offline")));

    assert_eq!(
        outcome,
        RefreshOutcome::Failed {
            message: "db offline".to_string()
        }
    );
    assert!(!store.is_loading());
    assert_eq!(store.records().len(), 2);
    assert_eq!(store.realized_query(), Some(""));
}

#[test]
fn late_completion_of_older_refresh_is_discarded() {
    let mut store = ListStore::new();
    let older = store.begin_refresh("n");
    let newer = store.begin_refresh("nguyen");
    assert_eq!(older.seq() + 1, newer.seq());

    let outcome = store.complete_refresh(newer, Ok(vec![student(1, "Nguyen A")]));
    assert_eq!(outcome, RefreshOutcome::Applied { count: 1 });

    let outcome = store.complete_refresh(
        older,
        Ok(vec![student(1, "Nguyen A"), student(3, "Ngo C")]),
    );
    assert_eq!(outcome, RefreshOutcome::Discarded);
    assert_eq!(store.records().len(), 1);
    assert_eq!(store.realized_query(), Some("nguyen"));
}

#[test]
fn older_completion_does_not_clear_loading_of_newer_refresh() {
    let mut store = ListStore::new();
    let older = store.begin_refresh("n");
    let newer = store.begin_refresh("ng");

    let outcome = store.complete_refresh(older, Err(ClientError::remote(503, "busy")));
    assert_eq!(outcome, RefreshOutcome::Discarded);
    assert!(store.is_loading());

    store.complete_refresh(newer, Ok(Vec::new()));
    assert!(!store.is_loading());
    assert_eq!(store.realized_query(), Some("ng"));
}
