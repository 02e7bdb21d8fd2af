//! In-memory resource store.
//!
//! Honors the same contract as the SQLite store (sequential ids starting at 1,
//! unique names, insertion order) without touching disk. Used as a fixture in
//! tests and for running the API without a database file.

use crate::error::{Result, StorageError};
use crate::model::{NewResource, Resource};
use crate::resources::ResourceStore;
use chrono::Utc;
use std::collections::HashSet;

/// Vector-backed resource store
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    resources: Vec<Resource>,
    next_id: i64,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResourceStore for MemoryStore {
    fn list_resources(&self) -> Result<Vec<Resource>> {
        Ok(self.resources.clone())
    }

    fn insert_resource(&mut self, new: &NewResource) -> Result<Resource> {
        if self.resources.iter().any(|r| r.name == new.name) {
            return Err(StorageError::DuplicateName(new.name.clone()));
        }

        self.next_id += 1;
        let resource = new.clone().into_resource(self.next_id, Utc::now());
        self.resources.push(resource.clone());
        Ok(resource)
    }

    fn count_resources(&self) -> Result<usize> {
        Ok(self.resources.len())
    }

    /// All-or-nothing: the whole batch is checked before anything is stored.
    fn insert_resources(&mut self, records: &[NewResource]) -> Result<Vec<Resource>> {
        let mut names: HashSet<&str> = self.resources.iter().map(|r| r.name.as_str()).collect();
        if let Some(duplicate) = records.iter().find(|r| !names.insert(r.name.as_str())) {
            return Err(StorageError::DuplicateName(duplicate.name.clone()));
        }

        let now = Utc::now();
        let inserted: Vec<Resource> = records
            .iter()
            .map(|new| {
                self.next_id += 1;
                new.clone().into_resource(self.next_id, now)
            })
            .collect();

        self.resources.extend(inserted.iter().cloned());
        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_assigns_sequential_ids() {
        let mut store = MemoryStore::new();
        let a = store
            .insert_resource(&NewResource::storage("a", "AWS", "S3", 1.0, 1.0))
            .unwrap();
        let b = store
            .insert_resource(&NewResource::storage("b", "AWS", "S3", 1.0, 1.0))
            .unwrap();

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(store.count_resources().unwrap(), 2);
    }

    #[test]
    fn test_memory_store_rejects_duplicate_names() {
        let mut store = MemoryStore::new();
        let record = NewResource::compute("api", "GCP", "n1-standard-2", 50.0, 50.0, 40.0);
        store.insert_resource(&record).unwrap();

        assert!(matches!(
            store.insert_resource(&record),
            Err(StorageError::DuplicateName(_))
        ));
        assert_eq!(store.list_resources().unwrap().len(), 1);
    }

    #[test]
    fn test_memory_store_batch_is_all_or_nothing() {
        let mut store = MemoryStore::new();
        store
            .insert_resource(&NewResource::storage("existing", "AWS", "S3", 1.0, 1.0))
            .unwrap();

        let batch = vec![
            NewResource::storage("fresh", "AWS", "S3", 1.0, 1.0),
            NewResource::storage("existing", "AWS", "S3", 1.0, 1.0),
        ];
        assert!(matches!(
            store.insert_resources(&batch),
            Err(StorageError::DuplicateName(name)) if name == "existing"
        ));

        let names: Vec<String> = store
            .list_resources()
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["existing"]);

        // A rejected batch does not consume ids.
        let next = store
            .insert_resource(&NewResource::storage("fresh", "AWS", "S3", 1.0, 1.0))
            .unwrap();
        assert_eq!(next.id, 2);
    }

    #[test]
    fn test_memory_store_batch_rejects_duplicates_within_batch() {
        let mut store = MemoryStore::new();
        let batch = vec![
            NewResource::storage("twin", "AWS", "S3", 1.0, 1.0),
            NewResource::storage("twin", "GCP", "Standard", 2.0, 2.0),
        ];

        assert!(store.insert_resources(&batch).is_err());
        assert_eq!(store.count_resources().unwrap(), 0);
    }
}
