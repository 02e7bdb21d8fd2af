// Demonstration inventory

use crate::error::Result;
use crate::model::NewResource;
use crate::resources::ResourceStore;
use tracing::{debug, info};

/// The demonstration inventory: five compute instances and three storage units
/// across AWS, Azure and GCP.
pub fn sample_resources() -> Vec<NewResource> {
    vec![
        NewResource::compute("web-server-1", "AWS", "t3.xlarge", 15.0, 25.0, 150.0)
            .with_storage_gb(100.0),
        NewResource::compute("api-server-2", "AWS", "m5.large", 12.0, 30.0, 90.0)
            .with_storage_gb(50.0),
        NewResource::compute("worker-3", "Azure", "Standard_D2s_v3", 8.0, 20.0, 70.0)
            .with_storage_gb(75.0),
        NewResource::compute("database-1", "AWS", "m5.xlarge", 75.0, 85.0, 180.0)
            .with_storage_gb(200.0),
        NewResource::compute("cache-server", "GCP", "n1-standard-2", 65.0, 70.0, 50.0)
            .with_storage_gb(30.0),
        NewResource::storage("backup-storage", "AWS", "S3 Standard", 1000.0, 100.0),
        NewResource::storage("log-storage", "GCP", "Cloud Storage", 500.0, 75.0),
        NewResource::storage("database-storage", "AWS", "EBS GP3", 200.0, 25.0),
    ]
}

/// Load the demonstration inventory if the store holds no resources.
///
/// Returns the number of records inserted (zero when the store was not empty).
pub fn seed_if_empty(store: &mut dyn ResourceStore) -> Result<usize> {
    let existing = store.count_resources()?;
    if existing > 0 {
        debug!("Store already holds {} resources, skipping seed", existing);
        return Ok(0);
    }

    let inserted = store.insert_resources(&sample_resources())?;
    info!("Seeded {} demonstration resources", inserted.len());
    Ok(inserted.len())
}
