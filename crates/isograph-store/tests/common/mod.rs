use isograph_core::{GraphClass, Iri, ModelRegistry, RelationalClass, ValueType};
use isograph_store::{db, migrations, SqliteRelationalStore};
use rusqlite::Connection;
use tempfile::TempDir;

/// Migrated on-disk database with the `users` table of the fixture schema
#[allow(dead_code)]
pub fn setup_db() -> (TempDir, Connection) {
    let dir = TempDir::new().unwrap();
    let mut conn = db::open(dir.path().join("store.db")).unwrap();
    migrations::apply_migrations(&mut conn).unwrap();
    conn.execute_batch(
        "CREATE TABLE users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            email VARCHAR NOT NULL DEFAULT '',
            encrypted_password VARCHAR NOT NULL DEFAULT '',
            created_at DATETIME,
            updated_at DATETIME
        );
        CREATE UNIQUE INDEX index_users_on_email ON users (email);",
    )
    .unwrap();
    (dir, conn)
}

#[allow(dead_code)]
pub fn user_class(conn: &Connection) -> RelationalClass {
    SqliteRelationalStore::new(conn).reflect("User", "users").unwrap()
}

#[allow(dead_code)]
pub fn person_class() -> GraphClass {
    GraphClass::new("Person")
        .with_base_uri("http://example.org/example/people")
        .unwrap()
        .with_default_vocabulary("http://example.org/example/vocab")
        .unwrap()
        .with_rdf_type(Iri::parse("http://xmlns.com/foaf/0.1/Person").unwrap())
        .with_property(
            "name",
            Iri::parse("http://xmlns.com/foaf/0.1/name").unwrap(),
            ValueType::Text,
        )
}

/// `User` reflected from the database, `Person`, and `graph_class < Person`
/// isomorphic with `:user`
#[allow(dead_code)]
pub fn registry(conn: &Connection, graph_class: &str, delegation: bool) -> ModelRegistry {
    let mut registry = ModelRegistry::new();
    registry.register_relational(user_class(conn)).unwrap();
    let person = person_class();
    registry
        .register_graph(GraphClass::extending(graph_class, &person))
        .unwrap();
    registry.register_graph(person).unwrap();
    registry
        .define_isomorphism(
            graph_class,
            "user",
            isograph_core::IsomorphismOptions { delegation },
        )
        .unwrap();
    registry
}
