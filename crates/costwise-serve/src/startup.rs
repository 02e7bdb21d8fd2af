//! Schema and seed initialization
//!
//! Startup is two independent steps: bring the schema up to date, then load
//! the demonstration inventory if the store is empty.

use costwise_store::{seed_if_empty, Result as StorageResult, SchemaOutcome, Storage};
use tracing::info;

/// What startup initialization did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartupReport {
    /// How the schema was brought up to date
    pub schema: SchemaOutcome,
    /// Demonstration records inserted (zero if the store already had data)
    pub seeded: usize,
}

/// Run `ensure_schema()` and, when `seed` is set, `seed_if_empty()`.
pub fn initialize(storage: &mut Storage, seed: bool) -> StorageResult<StartupReport> {
    let schema = storage.ensure_schema()?;

    let seeded = if seed { seed_if_empty(storage)? } else { 0 };

    info!("Storage ready (schema: {:?}, seeded: {})", schema, seeded);
    Ok(StartupReport { schema, seeded })
}
