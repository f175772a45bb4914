/// One embedded migration
#[derive(Debug, Clone, Copy)]
pub struct Migration {
    pub id: &'static str,
    pub sql: &'static str,
}

/// All embedded migrations, in application order
pub fn get_migrations() -> Vec<Migration> {
    vec![Migration {
        id: "001_graph_statements",
        sql: include_str!("../../migrations/001_graph_statements.sql"),
    }]
}
