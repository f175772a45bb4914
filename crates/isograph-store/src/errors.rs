//! Store-side constructors for `IsographError`

use isograph_core::IsographError;

pub fn migration_error(migration_id: &str, reason: &str) -> IsographError {
    IsographError::Migration {
        migration_id: migration_id.to_string(),
        reason: reason.to_string(),
    }
}

pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> IsographError {
    IsographError::ChecksumMismatch {
        migration_id: migration_id.to_string(),
        expected: expected.to_string(),
        actual: actual.to_string(),
    }
}

pub fn from_rusqlite(err: rusqlite::Error) -> IsographError {
    IsographError::Persistence {
        op: "sqlite".to_string(),
        message: err.to_string(),
    }
}

pub fn io_error(operation: &str, err: std::io::Error) -> IsographError {
    IsographError::Io {
        op: operation.to_string(),
        message: err.to_string(),
    }
}
