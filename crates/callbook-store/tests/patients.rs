use callbook_core::parse_search;
use callbook_core::CoreError;
use callbook_store::error::StoreError;
use callbook_store::query::PatientQuery;
use callbook_store::repo::{PatientNew, PatientUpdate};
use callbook_store::Store;

fn store() -> Store {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");
    store
}

fn patient(name: &str, phone: &str) -> PatientNew {
    PatientNew {
        name: name.to_string(),
        primary_phone: phone.to_string(),
    }
}

#[test]
fn patient_create_get_update() {
    let store = store();
    let now = 1_700_000_000;
    let created = store
        .patients()
        .create(now, patient("  Susan   Everyteen ", "123-123-1234"))
        .expect("create patient");
    assert_eq!(created.name, "Susan Everyteen");

    let fetched = store
        .patients()
        .get(created.id)
        .expect("get patient")
        .expect("patient exists");
    assert_eq!(fetched, created);

    let updated = store
        .patients()
        .update(
            now + 10,
            created.id,
            PatientUpdate {
                primary_phone: Some("(555) 000-1111".to_string()),
                ..Default::default()
            },
        )
        .expect("update patient");
    assert_eq!(updated.primary_phone, "(555) 000-1111");
    assert_eq!(updated.updated_at, now + 10);

    let by_phone = store
        .patients()
        .list_by_phone("555-000-1111")
        .expect("list by phone");
    assert_eq!(by_phone.len(), 1);
    assert!(store
        .patients()
        .list_by_phone("123-123-1234")
        .expect("list by phone")
        .is_empty());
}

#[test]
fn patient_create_rejects_invalid_phone() {
    let store = store();
    let err = store
        .patients()
        .create(1_700_000_000, patient("Susan Everyteen", "none"))
        .unwrap_err();
    assert!(matches!(err, StoreError::Core(CoreError::InvalidPhone(_))));
}

#[test]
fn search_matches_name_terms_case_insensitively() {
    let store = store();
    let now = 1_700_000_000;
    store
        .patients()
        .create(now, patient("Susan Everyteen", "123-123-1234"))
        .expect("create");
    store
        .patients()
        .create(now, patient("Susan Sher", "202-555-0100"))
        .expect("create");
    store
        .patients()
        .create(now, patient("Olga Everyteen", "202-555-0199"))
        .expect("create");

    let query = PatientQuery::from_search(&parse_search("susan everyteen").unwrap());
    let results = store.patients().search(&query, None).expect("search");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].patient.name, "Susan Everyteen");

    let query = PatientQuery::from_search(&parse_search("Susan").unwrap());
    let names: Vec<_> = store
        .patients()
        .search(&query, None)
        .expect("search")
        .into_iter()
        .map(|row| row.patient.name)
        .collect();
    assert_eq!(names, vec!["Susan Everyteen", "Susan Sher"]);

    let query = PatientQuery::from_search(&parse_search("phone:202-555").unwrap());
    let results = store.patients().search(&query, Some(1)).expect("search");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].patient.name, "Olga Everyteen");
}

#[test]
fn search_treats_like_wildcards_literally() {
    let store = store();
    let now = 1_700_000_000;
    store
        .patients()
        .create(now, patient("Susan Everyteen", "123-123-1234"))
        .expect("create");
    store
        .patients()
        .create(now, patient("Olga Sher", "202-555-0199"))
        .expect("create");

    for raw in ["%", "S_san", "\\"] {
        let query = PatientQuery::from_search(&parse_search(raw).unwrap());
        let results = store.patients().search(&query, None).expect("search");
        assert!(results.is_empty(), "{raw} matched {results:?}");
    }

    store
        .patients()
        .create(now, patient("Ann 100%_Sure", "202-555-0100"))
        .expect("create");
    let query = PatientQuery::from_search(&parse_search("100%_").unwrap());
    let results = store.patients().search(&query, None).expect("search");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].patient.name, "Ann 100%_Sure");
}

#[test]
fn delete_refuses_patient_with_calls() {
    let store = store();
    let now = 1_700_000_000;
    let susan = store
        .patients()
        .create(now, patient("Susan Everyteen", "123-123-1234"))
        .expect("create");
    let user = store
        .users()
        .create(
            now,
            callbook_store::repo::UserNew {
                name: "Dana Caller".to_string(),
            },
        )
        .expect("create user");
    store.session().login(now, user.id).expect("login");
    store
        .calls()
        .record_for_session(now, susan.id, callbook_core::CallOutcome::Reached, None)
        .expect("record call");

    let err = store.patients().delete(susan.id).unwrap_err();
    assert!(matches!(err, StoreError::PatientHasCalls(_)));

    let other = store
        .patients()
        .create(now, patient("Olga Everyteen", "202-555-0199"))
        .expect("create");
    store.patients().delete(other.id).expect("delete");
    assert!(store.patients().get(other.id).expect("get").is_none());
}
