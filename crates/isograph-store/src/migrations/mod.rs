//! Migration framework
//!
//! - Embedded SQL, applied in order, each in its own transaction
//! - SHA-256 checksum recorded per migration and verified on every run
//! - Idempotent: applied migrations are skipped

mod checksums;
mod embedded;
mod runner;

pub use embedded::{get_migrations, Migration};
pub use runner::{applied_migrations, apply_migrations, AppliedMigration};
