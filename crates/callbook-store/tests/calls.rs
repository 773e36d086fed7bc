use callbook_core::domain::{CallOutcome, Patient, User};
use callbook_core::CoreError;
use callbook_store::error::StoreError;
use callbook_store::query::PatientQuery;
use callbook_store::repo::{PatientNew, UserNew};
use callbook_store::Store;

const NOW: i64 = 1_700_000_000;

fn setup() -> (Store, Patient, User) {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");
    let patient = store
        .patients()
        .create(
            NOW,
            PatientNew {
                name: "Susan Everyteen".to_string(),
                primary_phone: "123-123-1234".to_string(),
            },
        )
        .expect("create patient");
    let user = store
        .users()
        .create(
            NOW,
            UserNew {
                name: "Dana Caller".to_string(),
            },
        )
        .expect("create user");
    (store, patient, user)
}

#[test]
fn recording_requires_a_session() {
    let (store, patient, _user) = setup();
    let err = store
        .calls()
        .record_for_session(NOW, patient.id, CallOutcome::Reached, None)
        .unwrap_err();
    assert!(matches!(err, StoreError::NotAuthenticated));
    assert!(store
        .calls()
        .list_for_patient(patient.id)
        .expect("list calls")
        .is_empty());
}

#[test]
fn recorded_call_is_attributed_to_session_user() {
    let (store, patient, user) = setup();
    store.session().login(NOW, user.id).expect("login");

    let (record, caller) = store
        .calls()
        .record_for_session(NOW + 5, patient.id, CallOutcome::LeftVoicemail, None)
        .expect("record call");
    assert_eq!(caller.id, user.id);
    assert_eq!(record.user_id, user.id);
    assert_eq!(record.occurred_at, NOW + 5);

    let log = store
        .calls()
        .list_for_patient(patient.id)
        .expect("list calls");
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].record, record);
    assert_eq!(log[0].user_name, "Dana Caller");
    assert_eq!(log[0].record.outcome, CallOutcome::LeftVoicemail);
}

#[test]
fn repeated_calls_each_get_a_row_newest_first() {
    let (store, patient, user) = setup();
    store.session().login(NOW, user.id).expect("login");

    let calls = store.calls();
    let (first, _) = calls
        .record_for_session(NOW, patient.id, CallOutcome::Reached, None)
        .expect("first call");
    let (second, _) = calls
        .record_for_session(NOW, patient.id, CallOutcome::Reached, None)
        .expect("second call");
    let (third, _) = calls
        .record_for_session(NOW + 60, patient.id, CallOutcome::CouldNotReach, None)
        .expect("third call");

    let log = calls.list_for_patient(patient.id).expect("list calls");
    let ids: Vec<_> = log.iter().map(|row| row.record.id).collect();
    assert_eq!(ids, vec![third.id, second.id, first.id]);
    let reached = log
        .iter()
        .filter(|row| row.record.outcome == CallOutcome::Reached)
        .count();
    assert_eq!(reached, 2);
}

#[test]
fn backdated_call_sorts_by_occurrence() {
    let (store, patient, user) = setup();
    store.session().login(NOW, user.id).expect("login");

    let (recent, _) = store
        .calls()
        .record_for_session(NOW, patient.id, CallOutcome::Reached, None)
        .expect("recent call");
    let (earlier, _) = store
        .calls()
        .record_for_session(NOW + 10, patient.id, CallOutcome::Reached, Some(NOW - 3600))
        .expect("backdated call");
    assert_eq!(earlier.created_at, NOW + 10);

    let log = store.calls().list_for_patient(patient.id).expect("list");
    assert_eq!(log[0].record.id, recent.id);
    assert_eq!(log[1].record.id, earlier.id);
}

#[test]
fn future_call_time_is_rejected() {
    let (store, patient, user) = setup();
    store.session().login(NOW, user.id).expect("login");
    let err = store
        .calls()
        .record_for_session(NOW, patient.id, CallOutcome::Reached, Some(NOW + 1))
        .unwrap_err();
    assert!(matches!(err, StoreError::Core(CoreError::TimestampInFuture)));
}

#[test]
fn recording_for_unknown_patient_is_not_found() {
    let (store, _patient, user) = setup();
    store.session().login(NOW, user.id).expect("login");
    let err = store
        .calls()
        .record_for_session(NOW, callbook_core::PatientId::new(), CallOutcome::Reached, None)
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}

#[test]
fn call_records_cannot_be_changed_or_removed() {
    let (store, patient, user) = setup();
    store.session().login(NOW, user.id).expect("login");
    let (record, _) = store
        .calls()
        .record_for_session(NOW, patient.id, CallOutcome::Reached, None)
        .expect("record call");

    let conn = store.connection();
    assert!(conn
        .execute(
            "UPDATE call_records SET outcome = 'left_voicemail' WHERE id = ?1;",
            [record.id.to_string()],
        )
        .is_err());
    assert!(conn
        .execute(
            "DELETE FROM call_records WHERE id = ?1;",
            [record.id.to_string()],
        )
        .is_err());

    let stored = store
        .calls()
        .list_for_patient(patient.id)
        .expect("list calls");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].record.id, record.id);
    assert_eq!(stored[0].record.outcome, CallOutcome::Reached);
}

#[test]
fn latest_call_per_patient() {
    let (store, patient, user) = setup();
    let other = store
        .patients()
        .create(
            NOW,
            PatientNew {
                name: "Olga Everyteen".to_string(),
                primary_phone: "202-555-0199".to_string(),
            },
        )
        .expect("create patient");
    store.session().login(NOW, user.id).expect("login");
    store
        .calls()
        .record_for_session(NOW, patient.id, CallOutcome::Reached, Some(NOW - 100))
        .expect("call");
    store
        .calls()
        .record_for_session(NOW, patient.id, CallOutcome::Reached, Some(NOW - 10))
        .expect("call");

    let results = store
        .patients()
        .search(&PatientQuery::default(), None)
        .expect("search");
    let latest: Vec<_> = results
        .iter()
        .map(|row| (row.patient.id, row.last_call_at))
        .collect();
    assert_eq!(latest, vec![(other.id, None), (patient.id, Some(NOW - 10))]);
}
