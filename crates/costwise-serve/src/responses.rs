//! API response types matching frontend contract

use chrono::{DateTime, Utc};
use costwise_engine::{Confidence, Recommendation, RecommendationKind, Summary};
use costwise_store::{Resource, ResourceType};
use serde::{Deserialize, Serialize};

/// Body of `GET /`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootResponse {
    /// Service name
    pub message: String,
    /// Run state
    pub status: String,
}

impl Default for RootResponse {
    fn default() -> Self {
        Self {
            message: "Cloud Optimization Dashboard API".to_string(),
            status: "running".to_string(),
        }
    }
}

/// Body of `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `healthy` when the process answers
    pub status: String,
    /// Human-readable detail
    pub message: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
            message: "API is running properly".to_string(),
        }
    }
}

/// A stored resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceResponse {
    /// Store-assigned id
    pub id: i64,
    /// Unique name
    pub name: String,
    /// `compute` or `storage`
    pub resource_type: ResourceType,
    /// Cloud provider label
    pub provider: String,
    /// SKU label
    pub instance_type: String,
    /// CPU utilization percentage
    pub cpu_utilization: Option<f64>,
    /// Memory utilization percentage
    pub memory_utilization: Option<f64>,
    /// Size in gigabytes
    pub storage_gb: Option<f64>,
    /// Monthly cost
    pub monthly_cost: f64,
    /// Creation time (ISO-8601)
    pub created_at: DateTime<Utc>,
}

impl From<Resource> for ResourceResponse {
    fn from(resource: Resource) -> Self {
        Self {
            id: resource.id,
            name: resource.name,
            resource_type: resource.resource_type,
            provider: resource.provider,
            instance_type: resource.instance_type,
            cpu_utilization: resource.cpu_utilization,
            memory_utilization: resource.memory_utilization,
            storage_gb: resource.storage_gb,
            monthly_cost: resource.monthly_cost,
            created_at: resource.created_at,
        }
    }
}

/// A cost-optimization recommendation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResponse {
    /// Resource the suggestion applies to
    pub resource_id: i64,
    /// Name of that resource
    pub resource_name: String,
    /// `downsize_instance` or `optimize_storage`
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    /// Current provisioning
    pub current_config: String,
    /// Suggested provisioning
    pub recommended_config: String,
    /// Why the rule fired
    pub reasoning: String,
    /// Projected monthly savings
    pub monthly_savings: f64,
    /// `High` or `Medium`
    pub confidence: Confidence,
}

impl From<Recommendation> for RecommendationResponse {
    fn from(rec: Recommendation) -> Self {
        Self {
            resource_id: rec.resource_id,
            resource_name: rec.resource_name,
            kind: rec.kind,
            current_config: rec.current_config,
            recommended_config: rec.recommended_config,
            reasoning: rec.reasoning,
            monthly_savings: rec.monthly_savings,
            confidence: rec.confidence,
        }
    }
}

/// Body of `GET /summary`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SummaryResponse {
    /// Number of tracked resources
    pub total_resources: usize,
    /// Sum of monthly costs
    pub total_monthly_cost: f64,
    /// Sum of projected savings
    pub total_potential_savings: f64,
    /// Number of recommendations
    pub optimization_opportunities: usize,
}

impl From<Summary> for SummaryResponse {
    fn from(summary: Summary) -> Self {
        Self {
            total_resources: summary.total_resources,
            total_monthly_cost: summary.total_monthly_cost,
            total_potential_savings: summary.total_potential_savings,
            optimization_opportunities: summary.optimization_opportunities,
        }
    }
}
