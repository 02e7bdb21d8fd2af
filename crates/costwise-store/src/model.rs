// Resource records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of cloud resource
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    /// A virtual machine or container host
    Compute,
    /// A bucket, volume, or other storage unit
    Storage,
}

impl ResourceType {
    /// Return the string representation of the resource type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Compute => "compute",
            ResourceType::Storage => "storage",
        }
    }

    /// Create a resource type from its string representation.
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s {
            "compute" => Some(ResourceType::Compute),
            "storage" => Some(ResourceType::Storage),
            _ => None,
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored cloud resource with its utilization and cost metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Store-assigned identifier
    pub id: i64,
    /// Unique resource name
    pub name: String,
    /// Compute or storage
    pub resource_type: ResourceType,
    /// Cloud provider label (AWS, Azure, GCP, ...)
    pub provider: String,
    /// Provisioned SKU label
    pub instance_type: String,
    /// CPU utilization percentage
    pub cpu_utilization: Option<f64>,
    /// Memory utilization percentage
    pub memory_utilization: Option<f64>,
    /// Provisioned size in gigabytes
    pub storage_gb: Option<f64>,
    /// Monthly cost in the billing currency
    pub monthly_cost: f64,
    /// Creation time, set once by the store
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a resource; the store assigns `id` and `created_at`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewResource {
    /// Unique resource name
    pub name: String,
    /// Compute or storage
    pub resource_type: ResourceType,
    /// Cloud provider label
    pub provider: String,
    /// Provisioned SKU label
    pub instance_type: String,
    /// CPU utilization percentage
    #[serde(default)]
    pub cpu_utilization: Option<f64>,
    /// Memory utilization percentage
    #[serde(default)]
    pub memory_utilization: Option<f64>,
    /// Provisioned size in gigabytes
    #[serde(default)]
    pub storage_gb: Option<f64>,
    /// Monthly cost in the billing currency
    pub monthly_cost: f64,
}

impl NewResource {
    /// Compute resource with utilization metrics and no storage size.
    pub fn compute(
        name: impl Into<String>,
        provider: impl Into<String>,
        instance_type: impl Into<String>,
        cpu_utilization: f64,
        memory_utilization: f64,
        monthly_cost: f64,
    ) -> Self {
        Self {
            name: name.into(),
            resource_type: ResourceType::Compute,
            provider: provider.into(),
            instance_type: instance_type.into(),
            cpu_utilization: Some(cpu_utilization),
            memory_utilization: Some(memory_utilization),
            storage_gb: None,
            monthly_cost,
        }
    }

    /// Storage resource with a size and no utilization metrics.
    pub fn storage(
        name: impl Into<String>,
        provider: impl Into<String>,
        instance_type: impl Into<String>,
        storage_gb: f64,
        monthly_cost: f64,
    ) -> Self {
        Self {
            name: name.into(),
            resource_type: ResourceType::Storage,
            provider: provider.into(),
            instance_type: instance_type.into(),
            cpu_utilization: None,
            memory_utilization: None,
            storage_gb: Some(storage_gb),
            monthly_cost,
        }
    }

    /// Attach a storage size, e.g. the boot disk of a compute instance.
    #[must_use]
    pub fn with_storage_gb(mut self, storage_gb: f64) -> Self {
        self.storage_gb = Some(storage_gb);
        self
    }

    /// Materialize the stored record.
    pub fn into_resource(self, id: i64, created_at: DateTime<Utc>) -> Resource {
        Resource {
            id,
            name: self.name,
            resource_type: self.resource_type,
            provider: self.provider,
            instance_type: self.instance_type,
            cpu_utilization: self.cpu_utilization,
            memory_utilization: self.memory_utilization,
            storage_gb: self.storage_gb,
            monthly_cost: self.monthly_cost,
            created_at,
        }
    }
}
