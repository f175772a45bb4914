#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Scenario: bob@example.com on both sides of the isomorphism
//!
//! Create User U, create IsomorphicPerson P, link through P, then observe
//! the link from both directions and through delegation.

mod common;

use common::{attrs, registry, registry_with, session, stores};
use isograph_core::{IsographError, IsomorphismOptions, Value};

#[test]
fn test_scenario_link_from_graph_side() {
    let registry = registry();
    let stores = stores();
    let session = session(&registry, &stores);

    let u = session
        .create_record("User", attrs(&[("email", Value::from("bob@example.com"))]))
        .unwrap();
    let mut p = session.graph_for_subject("IsomorphicPerson", "bob").unwrap();
    session.relate(&mut p, "user", Some((&u).into())).unwrap();
    session.save_graph(&p).unwrap();

    assert_eq!(
        session.read_graph_attr(&p, "user_id").unwrap(),
        Value::from(u.id())
    );
    assert_eq!(session.related(&p, "user").unwrap().as_ref(), Some(&u));
    assert_eq!(
        session.graph_for(&u, "isomorphic_person").unwrap().as_ref(),
        Some(&p)
    );
    assert_eq!(
        session.read_graph_attr(&p, "email").unwrap(),
        Value::from("bob@example.com")
    );
}

#[test]
fn test_scenario_link_from_relational_side() {
    let registry = registry();
    let stores = stores();
    let session = session(&registry, &stores);

    let u = session
        .create_record("User", attrs(&[("email", Value::from("bob@example.com"))]))
        .unwrap();
    let mut p = session.graph_for_subject("IsomorphicPerson", "bob").unwrap();
    session
        .relate_graph(&u, "isomorphic_person", Some((&mut p).into()))
        .unwrap();

    // Same link as setting it from the graph side
    let fresh = session.graph_for_subject("IsomorphicPerson", "bob").unwrap();
    assert_eq!(session.related(&fresh, "user").unwrap(), Some(u.clone()));
    assert_eq!(session.graph_for(&u, "isomorphic_person").unwrap(), Some(p));
}

#[test]
fn test_scenario_without_delegation() {
    let registry = registry_with(IsomorphismOptions::without_delegation());
    let stores = stores();
    let session = session(&registry, &stores);

    let u = session
        .create_record("User", attrs(&[("email", Value::from("bob@example.com"))]))
        .unwrap();
    let mut p = session.graph_for_subject("IsomorphicPerson", "bob").unwrap();
    session.relate(&mut p, "user", Some((&u).into())).unwrap();
    session.save_graph(&p).unwrap();

    assert_eq!(session.related(&p, "user").unwrap(), Some(u.clone()));
    assert_eq!(session.graph_for(&u, "isomorphic_person").unwrap(), Some(p.clone()));
    assert!(matches!(
        session.read_graph_attr(&p, "email"),
        Err(IsographError::NoMethod { .. })
    ));
}
