//! Record commands
//!
//! Usage: isograph create-record <MODEL> [KEY=VALUE]...
//!        isograph show-record <MODEL> <ID> [--json]

use clap::Args;
use serde_json::json;

use super::{display_value, json_value, parse_assignments, session, Globals};

#[derive(Debug, Args)]
pub struct CreateRecordArgs {
    /// Relational model name, e.g. User
    pub model: String,

    /// Column values
    #[arg(value_name = "KEY=VALUE")]
    pub assignments: Vec<String>,
}

#[derive(Debug, Args)]
pub struct ShowRecordArgs {
    pub model: String,

    pub id: i64,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn execute_create(globals: &Globals, args: CreateRecordArgs) -> anyhow::Result<()> {
    let registry = globals.registry()?;
    let conn = globals.connection()?;
    let session = session(&registry, &conn);

    let class = registry.require_relational(&args.model)?;
    let attributes = parse_assignments(class, &args.assignments)?;
    let record = session.create_record(class.name(), attributes)?;

    println!(
        "✓ Created {} {}",
        record.model(),
        isograph_core::Value::from(record.id())
    );
    Ok(())
}

pub fn execute_show(globals: &Globals, args: ShowRecordArgs) -> anyhow::Result<()> {
    let registry = globals.registry()?;
    let conn = globals.connection()?;
    let session = session(&registry, &conn);

    let class = registry.require_relational(&args.model)?;
    let record = session.find_record(class.name(), args.id)?;

    let mut links = Vec::new();
    for graph_role in class.reverse_accessors() {
        let instance = session.graph_for(&record, graph_role)?;
        links.push((graph_role, instance.map(|i| i.subject().to_string())));
    }

    if args.json {
        let mut attributes = serde_json::Map::new();
        for column in class.columns() {
            let value = record.get(class, &column.name).unwrap_or_default();
            attributes.insert(column.name.clone(), json_value(&value, column.sensitive));
        }
        let links: serde_json::Map<String, serde_json::Value> = links
            .into_iter()
            .map(|(role, subject)| (role.to_string(), json!(subject)))
            .collect();
        let out = json!({
            "model": record.model(),
            "id": record.id(),
            "attributes": attributes,
            "links": links,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{} {}", record.model(), args.id);
    for column in class.columns() {
        let value = record.get(class, &column.name).unwrap_or_default();
        println!("  {}: {}", column.name, display_value(&value, column.sensitive));
    }
    for (role, subject) in links {
        println!("  {} -> {}", role, subject.as_deref().unwrap_or("(none)"));
    }
    Ok(())
}
