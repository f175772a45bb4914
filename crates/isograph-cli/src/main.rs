//! Isograph CLI
//!
//! Command-line interface over a SQLite-backed pair of stores

use clap::{Parser, Subcommand, ValueEnum};
use isograph_core::logging_facility::{self, Profile};
use std::path::PathBuf;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "isograph")]
#[command(about = "Isograph - link relational records and graph instances", long_about = None)]
struct Cli {
    /// SQLite database holding both stores
    #[arg(long, global = true, default_value = ".isograph/store.db")]
    db: PathBuf,

    /// Schema file declaring models and isomorphisms
    #[arg(long, global = true, default_value = "isograph.toml")]
    schema: PathBuf,

    /// Log output on stderr
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply store migrations and create the schema's tables
    Migrate,
    /// Print the resolved schema: classes, accessors, delegations
    Schema,
    /// Insert a relational record
    CreateRecord(commands::record::CreateRecordArgs),
    /// Print a relational record and its linked graph instances
    ShowRecord(commands::record::ShowRecordArgs),
    /// Link a graph instance to a record through an accessor
    Link(commands::graph::LinkArgs),
    /// Clear a graph instance's link
    Unlink(commands::graph::UnlinkArgs),
    /// Print a graph instance and its linked records
    ShowGraph(commands::graph::ShowGraphArgs),
}

fn main() {
    let cli = Cli::parse();

    logging_facility::init(match cli.log_format {
        LogFormat::Text => Profile::Development,
        LogFormat::Json => Profile::Production,
    });

    let globals = commands::Globals {
        db: cli.db,
        schema: cli.schema,
    };

    let result = match cli.command {
        Commands::Migrate => commands::migrate::execute(&globals),
        Commands::Schema => commands::schema::execute(&globals),
        Commands::CreateRecord(args) => commands::record::execute_create(&globals, args),
        Commands::ShowRecord(args) => commands::record::execute_show(&globals, args),
        Commands::Link(args) => commands::graph::execute_link(&globals, args),
        Commands::Unlink(args) => commands::graph::execute_unlink(&globals, args),
        Commands::ShowGraph(args) => commands::graph::execute_show(&globals, args),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
