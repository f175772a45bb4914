use isograph_core::{
    Attributes, Column, GraphClass, GraphInstance, Iri, IsomorphismOptions, MemoryGraphStore,
    MemoryRelationalStore, ModelRegistry, Record, RelationalClass, Session, Value, ValueType,
};

#[allow(dead_code)]
pub const PEOPLE: &str = "http://example.org/example/people";
#[allow(dead_code)]
pub const VOCAB: &str = "http://example.org/example/vocab";
#[allow(dead_code)]
pub const FOAF_NAME: &str = "http://xmlns.com/foaf/0.1/name";
#[allow(dead_code)]
pub const FOAF_PERSON: &str = "http://xmlns.com/foaf/0.1/Person";

/// `users` table: email, encrypted_password, timestamps
#[allow(dead_code)]
pub fn user_class() -> RelationalClass {
    RelationalClass::new("User", "users")
        .column("email", ValueType::Text)
        .with_column(Column::new("encrypted_password", ValueType::Text).sensitive())
        .column("created_at", ValueType::Text)
        .column("updated_at", ValueType::Text)
}

/// `Person`: foaf:Person with a foaf:name, no isomorphism
#[allow(dead_code)]
pub fn person_class() -> GraphClass {
    GraphClass::new("Person")
        .with_base_uri(PEOPLE)
        .unwrap()
        .with_default_vocabulary(VOCAB)
        .unwrap()
        .with_rdf_type(Iri::parse(FOAF_PERSON).unwrap())
        .with_property("name", Iri::parse(FOAF_NAME).unwrap(), ValueType::Text)
}

/// Registry with `User`, `Person` and `IsomorphicPerson < Person`, the
/// latter declared isomorphic with `:user`
#[allow(dead_code)]
pub fn registry_with(options: IsomorphismOptions) -> ModelRegistry {
    let mut registry = ModelRegistry::new();
    registry.register_relational(user_class()).unwrap();
    let person = person_class();
    registry
        .register_graph(GraphClass::extending("IsomorphicPerson", &person))
        .unwrap();
    registry.register_graph(person).unwrap();
    registry
        .define_isomorphism("IsomorphicPerson", "user", options)
        .unwrap();
    registry
}

#[allow(dead_code)]
pub fn registry() -> ModelRegistry {
    registry_with(IsomorphismOptions::default())
}

#[allow(dead_code)]
pub struct Stores {
    pub users: MemoryRelationalStore,
    pub graph: MemoryGraphStore,
}

#[allow(dead_code)]
pub fn stores() -> Stores {
    Stores {
        users: MemoryRelationalStore::new(),
        graph: MemoryGraphStore::new(),
    }
}

#[allow(dead_code)]
pub fn session<'r>(
    registry: &'r ModelRegistry,
    stores: &'r Stores,
) -> Session<'r, &'r MemoryRelationalStore, &'r MemoryGraphStore> {
    Session::new(registry, &stores.users, &stores.graph)
}

#[allow(dead_code)]
pub fn attrs(pairs: &[(&str, Value)]) -> Attributes {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

/// `User.create(email: 'bob@example.com')`
#[allow(dead_code)]
pub fn new_user_bob<R, G>(session: &Session<'_, R, G>) -> Record
where
    R: isograph_core::RelationalStore,
    G: isograph_core::GraphStore,
{
    session
        .create_record("User", attrs(&[("email", Value::from("bob@example.com"))]))
        .unwrap()
}

/// Bob on both sides: named, linked and saved
#[allow(dead_code)]
pub fn bob_pair<R, G>(session: &Session<'_, R, G>, graph_class: &str) -> (GraphInstance, Record)
where
    R: isograph_core::RelationalStore,
    G: isograph_core::GraphStore,
{
    let user_bob = new_user_bob(session);
    let mut iso_bob = session.graph_for_subject(graph_class, "bob").unwrap();
    session
        .write_graph_attr(&mut iso_bob, "name", Value::from("Bob"))
        .unwrap();
    session
        .relate(&mut iso_bob, "user", Some((&user_bob).into()))
        .unwrap();
    session.save_graph(&iso_bob).unwrap();
    (iso_bob, user_bob)
}
