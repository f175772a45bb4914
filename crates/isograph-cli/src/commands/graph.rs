//! Graph instance commands
//!
//! Usage: isograph link <GRAPH> <SUBJECT> <ROLE> <ID>
//!        isograph unlink <GRAPH> <SUBJECT> <ROLE>
//!        isograph show-graph <GRAPH> <SUBJECT> [--json]
//!
//! SUBJECT is a local name under the class's base URI, or an absolute IRI.

use clap::Args;
use isograph_core::{IsographError, ModelRegistry};
use serde_json::json;

use super::{json_value, session, Globals};

#[derive(Debug, Args)]
pub struct LinkArgs {
    /// Graph class name, e.g. IsomorphicPerson
    pub graph: String,

    pub subject: String,

    /// Accessor name, e.g. user
    pub role: String,

    /// Primary key of the record to link
    pub id: i64,
}

#[derive(Debug, Args)]
pub struct UnlinkArgs {
    pub graph: String,

    pub subject: String,

    pub role: String,
}

#[derive(Debug, Args)]
pub struct ShowGraphArgs {
    pub graph: String,

    pub subject: String,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

/// Relational model on the far side of `graph.role`
fn target_model<'r>(registry: &'r ModelRegistry, graph: &str, role: &str) -> anyhow::Result<&'r str> {
    let association = registry
        .association(graph, role)
        .ok_or_else(|| IsographError::NoMethod {
            model: graph.to_string(),
            method: role.to_string(),
        })?;
    Ok(association.relational_class())
}

pub fn execute_link(globals: &Globals, args: LinkArgs) -> anyhow::Result<()> {
    let registry = globals.registry()?;
    let conn = globals.connection()?;
    let session = session(&registry, &conn);

    let model = target_model(&registry, &args.graph, &args.role)?;
    let record = session.find_record(model, args.id)?;
    let mut instance = session.graph_for_subject(&args.graph, &args.subject)?;
    session.relate(&mut instance, &args.role, Some((&record).into()))?;
    session.save_graph(&instance)?;

    println!(
        "✓ Linked {} {} to {} {}",
        args.graph,
        instance.subject(),
        record.model(),
        args.id
    );
    Ok(())
}

pub fn execute_unlink(globals: &Globals, args: UnlinkArgs) -> anyhow::Result<()> {
    let registry = globals.registry()?;
    let conn = globals.connection()?;
    let session = session(&registry, &conn);

    let mut instance = session.graph_for_subject(&args.graph, &args.subject)?;
    session.relate(&mut instance, &args.role, None)?;
    session.save_graph(&instance)?;

    println!("✓ Unlinked {} {} {}", args.graph, instance.subject(), args.role);
    Ok(())
}

pub fn execute_show(globals: &Globals, args: ShowGraphArgs) -> anyhow::Result<()> {
    let registry = globals.registry()?;
    let conn = globals.connection()?;
    let session = session(&registry, &conn);

    let class = registry.require_graph_class(&args.graph)?;
    let instance = session.graph_for_subject(class.name(), &args.subject)?;

    let mut links = Vec::new();
    for role in class.accessors() {
        let record = session.related(&instance, role)?;
        links.push((role, record.and_then(|r| r.id())));
    }

    if args.json {
        let properties: serde_json::Map<String, serde_json::Value> = class
            .properties()
            .iter()
            .map(|p| {
                let value = instance.get(class, &p.name).unwrap_or_default();
                (p.name.clone(), json_value(&value, false))
            })
            .collect();
        let links: serde_json::Map<String, serde_json::Value> = links
            .into_iter()
            .map(|(role, id)| (role.to_string(), json!(id)))
            .collect();
        let out = json!({
            "class": instance.class(),
            "subject": instance.subject().as_str(),
            "properties": properties,
            "links": links,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{} <{}>", instance.class(), instance.subject());
    for property in class.properties() {
        let value = instance.get(class, &property.name).unwrap_or_default();
        println!("  {}: {}", property.name, value);
    }
    for (role, id) in links {
        match id {
            Some(id) => println!("  {} -> {}", role, id),
            None => println!("  {} -> (none)", role),
        }
    }
    Ok(())
}
