//! costwise-store - Resource Inventory Storage
//!
//! SQLite-backed store for cloud resource records, plus an in-memory store
//! with the same contract and the demonstration data loaded on first start.

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

/// Storage error types.
pub mod error;
/// In-memory resource store.
pub mod memory;
/// Resource records and insert payloads.
pub mod model;
/// Resource store trait and its SQLite implementation.
pub mod resources;
/// Database schema, migrations, and connection management.
pub mod schema;
/// Demonstration records loaded into an empty store.
pub mod seed;

pub use error::{Result, StorageError};
pub use memory::MemoryStore;
pub use model::{NewResource, Resource, ResourceType};
pub use resources::ResourceStore;
pub use schema::{SchemaOutcome, Storage, StorageConfig};
pub use seed::{sample_resources, seed_if_empty};
