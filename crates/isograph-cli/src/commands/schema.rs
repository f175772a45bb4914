//! Schema command
//!
//! Usage: isograph schema [--schema <FILE>]

use super::Globals;

pub fn execute(globals: &Globals) -> anyhow::Result<()> {
    let registry = globals.registry()?;

    for class in registry.relational_classes() {
        println!("relational {} (table {})", class.name(), class.table());
        println!("  {}: integer, primary key", class.primary_key());
        for column in class.columns() {
            let marker = if column.sensitive { ", sensitive" } else { "" };
            println!("  {}: {}{}", column.name, column.value_type, marker);
        }
        print_list("reverse accessors", class.reverse_accessors());
        print_list("delegated", class.delegated_attributes());
    }

    for class in registry.graph_classes() {
        match class.parent() {
            Some(parent) => println!("graph {} < {}", class.name(), parent),
            None => println!("graph {}", class.name()),
        }
        if let Some(base_uri) = class.base_uri() {
            println!("  base uri: {}", base_uri);
        }
        if let Some(vocabulary) = class.default_vocabulary() {
            println!("  vocabulary: {}", vocabulary.base());
        }
        for property in class.properties() {
            println!(
                "  {}: {} <{}>",
                property.name, property.value_type, property.predicate
            );
        }
        print_list("accessors", class.accessors());
        print_list("delegated", class.delegated_attributes());
    }

    for association in registry.associations() {
        println!(
            "isomorphism {}.{} <-> {}.{} (delegation {})",
            association.graph_class(),
            association.role(),
            association.relational_class(),
            association.graph_role(),
            if association.delegation() { "on" } else { "off" }
        );
    }
    Ok(())
}

fn print_list<'a>(label: &str, names: impl Iterator<Item = &'a str>) {
    let names: Vec<&str> = names.collect();
    if !names.is_empty() {
        println!("  {}: {}", label, names.join(", "));
    }
}
