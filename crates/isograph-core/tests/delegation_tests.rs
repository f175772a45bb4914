#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{bob_pair, new_user_bob, registry, registry_with, session, stores};
use isograph_core::{IsographError, IsomorphismOptions, Value};

#[test]
fn test_graph_side_reads_relational_attributes() {
    let registry = registry();
    let stores = stores();
    let session = session(&registry, &stores);

    let (iso_bob, user_bob) = bob_pair(&session, "IsomorphicPerson");
    assert_eq!(
        session.read_graph_attr(&iso_bob, "email").unwrap(),
        session.read_record_attr(&user_bob, "email").unwrap()
    );
    assert_eq!(
        session.read_graph_attr(&iso_bob, "encrypted_password").unwrap(),
        session
            .read_record_attr(&user_bob, "encrypted_password")
            .unwrap()
    );
}

#[test]
fn test_relational_side_reads_graph_properties() {
    let registry = registry();
    let stores = stores();
    let session = session(&registry, &stores);

    let (iso_bob, user_bob) = bob_pair(&session, "IsomorphicPerson");
    assert_eq!(
        session.read_record_attr(&user_bob, "name").unwrap(),
        Value::from("Bob")
    );
    assert_eq!(
        session.read_record_attr(&user_bob, "name").unwrap(),
        session.read_graph_attr(&iso_bob, "name").unwrap()
    );
}

#[test]
fn test_delegated_writes_persist_on_the_other_side() {
    let registry = registry();
    let stores = stores();
    let session = session(&registry, &stores);

    let (mut iso_bob, mut user_bob) = bob_pair(&session, "IsomorphicPerson");

    session
        .write_graph_attr(&mut iso_bob, "email", Value::from("robert@example.com"))
        .unwrap();
    let reloaded = session.find_record("User", user_bob.id().unwrap()).unwrap();
    assert_eq!(
        session.read_record_attr(&reloaded, "email").unwrap(),
        Value::from("robert@example.com")
    );

    session
        .write_record_attr(&mut user_bob, "name", Value::from("Robert"))
        .unwrap();
    let reloaded = session.graph_for_subject("IsomorphicPerson", "bob").unwrap();
    assert_eq!(
        session.read_graph_attr(&reloaded, "name").unwrap(),
        Value::from("Robert")
    );
}

#[test]
fn test_native_names_are_never_forwarded() {
    let registry = registry();
    let iso = registry.graph_class("IsomorphicPerson").unwrap();
    let user = registry.relational("User").unwrap();

    // `name` is a graph property: not forwarded from the graph class
    assert!(iso.delegation("name").is_none());
    assert!(user.delegation("email").is_none());
    assert!(user.delegation("name").is_some());
    assert!(user.delegation("user_id").is_some());
    assert!(iso.delegation("email").is_some());
    assert!(iso.responds_to("encrypted_password"));
}

#[test]
fn test_null_link_is_no_association_target() {
    let registry = registry();
    let stores = stores();
    let session = session(&registry, &stores);

    let iso_bob = session.graph_for_subject("IsomorphicPerson", "bob").unwrap();
    assert_eq!(
        session.read_graph_attr(&iso_bob, "email").unwrap_err(),
        IsographError::NoAssociationTarget {
            model: "IsomorphicPerson".into(),
            role: "user".into(),
            attribute: "email".into(),
        }
    );

    let user_bob = new_user_bob(&session);
    assert!(matches!(
        session.read_record_attr(&user_bob, "name"),
        Err(IsographError::NoAssociationTarget { .. })
    ));
}

#[test]
fn test_disabled_delegation_is_no_method() {
    let registry = registry_with(IsomorphismOptions::without_delegation());
    let stores = stores();
    let session = session(&registry, &stores);

    let (mut iso_bob, mut user_bob) = bob_pair(&session, "IsomorphicPerson");

    for attribute in ["email", "encrypted_password"] {
        assert_eq!(
            session.read_graph_attr(&iso_bob, attribute).unwrap_err(),
            IsographError::NoMethod {
                model: "IsomorphicPerson".into(),
                method: attribute.into(),
            }
        );
    }
    assert!(matches!(
        session.read_record_attr(&user_bob, "name"),
        Err(IsographError::NoMethod { .. })
    ));
    assert!(matches!(
        session.write_graph_attr(&mut iso_bob, "email", Value::from("x@example.com")),
        Err(IsographError::NoMethod { .. })
    ));
    assert!(matches!(
        session.write_record_attr(&mut user_bob, "name", Value::from("Robert")),
        Err(IsographError::NoMethod { .. })
    ));

    // The link itself still works
    assert_eq!(session.related(&iso_bob, "user").unwrap(), Some(user_bob));
}
