#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{attrs, bob_pair, new_user_bob, registry, session, stores};
use isograph_core::{
    GraphStore, IsographError, ModelRef, Record, RelationalStore, TriplePattern, Value,
};

// ===== Graph side =====

#[test]
fn test_relate_sets_foreign_key() {
    let registry = registry();
    let stores = stores();
    let session = session(&registry, &stores);

    let mut iso_bob = session.graph_for_subject("IsomorphicPerson", "bob").unwrap();
    let user_bob = new_user_bob(&session);
    session
        .relate(&mut iso_bob, "user", Some((&user_bob).into()))
        .unwrap();

    assert_eq!(
        session.read_graph_attr(&iso_bob, "user_id").unwrap(),
        Value::from(user_bob.id())
    );
}

#[test]
fn test_relate_only_changes_memory_until_saved() {
    let registry = registry();
    let stores = stores();
    let session = session(&registry, &stores);

    let mut iso_bob = session.graph_for_subject("IsomorphicPerson", "bob").unwrap();
    let user_bob = new_user_bob(&session);
    session
        .relate(&mut iso_bob, "user", Some((&user_bob).into()))
        .unwrap();
    assert!(stores.graph.is_empty());

    session.save_graph(&iso_bob).unwrap();
    assert!(!stores.graph.is_empty());
}

#[test]
fn test_related_yields_equal_record() {
    let registry = registry();
    let stores = stores();
    let session = session(&registry, &stores);

    let (iso_bob, user_bob) = bob_pair(&session, "IsomorphicPerson");
    assert_eq!(session.related(&iso_bob, "user").unwrap(), Some(user_bob));
}

#[test]
fn test_related_is_none_without_link() {
    let registry = registry();
    let stores = stores();
    let session = session(&registry, &stores);

    let iso_bob = session.graph_for_subject("IsomorphicPerson", "bob").unwrap();
    assert_eq!(session.related(&iso_bob, "user").unwrap(), None);
}

#[test]
fn test_relate_wrong_type_is_type_mismatch() {
    let registry = registry();
    let stores = stores();
    let session = session(&registry, &stores);

    let mut iso_bob = session.graph_for_subject("IsomorphicPerson", "bob").unwrap();
    let other = session.graph_for_subject("IsomorphicPerson", "alice").unwrap();
    let err = session
        .relate(&mut iso_bob, "user", Some(ModelRef::Graph(&other)))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Expected a model of type User, but was of type IsomorphicPerson"
    );

    let admin = Record::new("Admin", Some(1), attrs(&[]));
    assert_eq!(
        session
            .relate(&mut iso_bob, "user", Some((&admin).into()))
            .unwrap_err(),
        IsographError::TypeMismatch {
            expected: "User".into(),
            actual: "Admin".into()
        }
    );
}

#[test]
fn test_relate_none_clears_link() {
    let registry = registry();
    let stores = stores();
    let session = session(&registry, &stores);

    let (mut iso_bob, _) = bob_pair(&session, "IsomorphicPerson");
    session.relate(&mut iso_bob, "user", None).unwrap();
    assert_eq!(session.read_graph_attr(&iso_bob, "user_id").unwrap(), Value::Null);
    assert_eq!(session.related(&iso_bob, "user").unwrap(), None);
}

#[test]
fn test_dangling_key_surfaces_not_found() {
    let registry = registry();
    let stores = stores();
    let session = session(&registry, &stores);

    let (iso_bob, user_bob) = bob_pair(&session, "IsomorphicPerson");
    session.delete_record("User", user_bob.id().unwrap()).unwrap();

    // The graph side is not touched by the delete
    let reloaded = session.graph_for_subject("IsomorphicPerson", "bob").unwrap();
    assert_eq!(
        session.read_graph_attr(&reloaded, "user_id").unwrap(),
        Value::from(user_bob.id())
    );
    assert!(matches!(
        session.related(&iso_bob, "user"),
        Err(IsographError::RecordNotFound { .. })
    ));
}

// ===== Relational side =====

#[test]
fn test_relate_graph_sets_foreign_key_and_persists() {
    let registry = registry();
    let stores = stores();
    let session = session(&registry, &stores);

    let mut iso_bob = session.graph_for_subject("IsomorphicPerson", "bob").unwrap();
    let user_bob = new_user_bob(&session);
    session
        .relate_graph(&user_bob, "isomorphic_person", Some((&mut iso_bob).into()))
        .unwrap();

    assert_eq!(
        session.read_graph_attr(&iso_bob, "user_id").unwrap(),
        Value::from(user_bob.id())
    );
    let reloaded = session.graph_for_subject("IsomorphicPerson", "bob").unwrap();
    assert_eq!(
        session.read_graph_attr(&reloaded, "user_id").unwrap(),
        Value::from(user_bob.id())
    );
}

#[test]
fn test_graph_for_yields_equal_instance() {
    let registry = registry();
    let stores = stores();
    let session = session(&registry, &stores);

    let (iso_bob, user_bob) = bob_pair(&session, "IsomorphicPerson");
    assert_eq!(
        session.graph_for(&user_bob, "isomorphic_person").unwrap(),
        Some(iso_bob)
    );
}

#[test]
fn test_graph_for_is_none_without_link() {
    let registry = registry();
    let stores = stores();
    let session = session(&registry, &stores);

    let user_bob = new_user_bob(&session);
    assert_eq!(session.graph_for(&user_bob, "isomorphic_person").unwrap(), None);
}

#[test]
fn test_reassigning_severs_previous_instance() {
    let registry = registry();
    let stores = stores();
    let session = session(&registry, &stores);

    let (_, user_bob) = bob_pair(&session, "IsomorphicPerson");
    let mut robert = session
        .graph_for_subject("IsomorphicPerson", "robert")
        .unwrap();
    session
        .relate_graph(&user_bob, "isomorphic_person", Some((&mut robert).into()))
        .unwrap();

    let old = session.graph_for_subject("IsomorphicPerson", "bob").unwrap();
    assert_eq!(session.read_graph_attr(&old, "user_id").unwrap(), Value::Null);
    assert_eq!(
        session.graph_for(&user_bob, "isomorphic_person").unwrap(),
        Some(robert)
    );

    // Exactly one statement carries the foreign key
    let fk = registry
        .association("IsomorphicPerson", "user")
        .unwrap()
        .predicate()
        .clone();
    let links = stores
        .graph
        .query(&TriplePattern::any().with_predicate(fk))
        .unwrap();
    assert_eq!(links.len(), 1);
}

#[test]
fn test_reassigning_same_instance_keeps_link() {
    let registry = registry();
    let stores = stores();
    let session = session(&registry, &stores);

    let (mut iso_bob, user_bob) = bob_pair(&session, "IsomorphicPerson");
    session
        .relate_graph(&user_bob, "isomorphic_person", Some((&mut iso_bob).into()))
        .unwrap();
    assert_eq!(
        session.graph_for(&user_bob, "isomorphic_person").unwrap(),
        Some(iso_bob)
    );
}

#[test]
fn test_relate_graph_none_severs() {
    let registry = registry();
    let stores = stores();
    let session = session(&registry, &stores);

    let (_, user_bob) = bob_pair(&session, "IsomorphicPerson");
    session
        .relate_graph(&user_bob, "isomorphic_person", None)
        .unwrap();
    assert_eq!(session.graph_for(&user_bob, "isomorphic_person").unwrap(), None);
    let old = session.graph_for_subject("IsomorphicPerson", "bob").unwrap();
    assert_eq!(session.read_graph_attr(&old, "user_id").unwrap(), Value::Null);
}

#[test]
fn test_relate_graph_wrong_type_is_type_mismatch() {
    let registry = registry();
    let stores = stores();
    let session = session(&registry, &stores);

    let user_bob = new_user_bob(&session);
    let mut person = session.graph_for_subject("Person", "bob").unwrap();
    let err = session
        .relate_graph(&user_bob, "isomorphic_person", Some((&mut person).into()))
        .unwrap_err();
    assert_eq!(
        err,
        IsographError::TypeMismatch {
            expected: "IsomorphicPerson".into(),
            actual: "Person".into()
        }
    );

    let mut other_user = new_user_bob(&session);
    assert_eq!(
        session
            .relate_graph(&user_bob, "isomorphic_person", Some((&mut other_user).into()))
            .unwrap_err(),
        IsographError::TypeMismatch {
            expected: "IsomorphicPerson".into(),
            actual: "User".into()
        }
    );
}

// ===== No isomorphism =====

#[test]
fn test_accessors_missing_without_isomorphism() {
    let registry = registry();
    let stores = stores();
    let session = session(&registry, &stores);

    let mut person_bob = session.graph_for_subject("Person", "bob").unwrap();
    let user_bob = new_user_bob(&session);

    assert!(matches!(
        session.relate(&mut person_bob, "user", Some((&user_bob).into())),
        Err(IsographError::NoMethod { .. })
    ));
    assert!(matches!(
        session.related(&person_bob, "user"),
        Err(IsographError::NoMethod { .. })
    ));
    assert!(matches!(
        session.relate_graph(&user_bob, "person", Some((&mut person_bob).into())),
        Err(IsographError::NoMethod { .. })
    ));
    assert!(matches!(
        session.graph_for(&user_bob, "person"),
        Err(IsographError::NoMethod { .. })
    ));
}

#[test]
fn test_records_have_identity_equality() {
    let registry = registry();
    let stores = stores();
    let session = session(&registry, &stores);

    let user_bob = new_user_bob(&session);
    let class = registry.relational("User").unwrap();
    let found = stores.users.find(class, user_bob.id().unwrap()).unwrap();
    assert_eq!(found, user_bob);
}
