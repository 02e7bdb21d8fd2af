//! Threshold rules.
//!
//! Each rule looks at a single resource and either produces one
//! recommendation or nothing. Rules are gated on resource type, so a compute
//! rule never fires for storage and vice versa.

use costwise_store::{Resource, ResourceType};

use crate::recommendation::{metric, round2, Confidence, Recommendation, RecommendationKind};

/// CPU utilization (percent) below which an instance counts as idle
pub const DOWNSIZE_CPU_THRESHOLD: f64 = 30.0;

/// Memory utilization (percent) below which an instance counts as idle
pub const DOWNSIZE_MEMORY_THRESHOLD: f64 = 50.0;

/// Fraction of the monthly cost saved by downsizing
pub const DOWNSIZE_SAVINGS_RATIO: f64 = 0.5;

/// Savings above this amount earn a high-confidence downsize
pub const HIGH_CONFIDENCE_SAVINGS: f64 = 50.0;

/// Storage size (GB) above which a volume counts as oversized
pub const STORAGE_SIZE_THRESHOLD_GB: f64 = 500.0;

/// Fraction of the monthly cost saved by shrinking storage
pub const STORAGE_SAVINGS_RATIO: f64 = 0.3;

/// Fraction of the current size kept after shrinking
pub const STORAGE_TARGET_RATIO: f64 = 0.7;

/// A static rule evaluated against one resource
pub trait Rule: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    /// Produce a recommendation when the rule applies
    fn evaluate(&self, resource: &Resource) -> Option<Recommendation>;
}

/// Compute instances with low CPU and memory use should move to a smaller SKU
#[derive(Debug, Clone, Copy, Default)]
pub struct DownsizeUnderutilizedCompute;

impl Rule for DownsizeUnderutilizedCompute {
    fn name(&self) -> &'static str {
        "downsize_underutilized_compute"
    }

    fn evaluate(&self, resource: &Resource) -> Option<Recommendation> {
        if resource.resource_type != ResourceType::Compute {
            return None;
        }

        let (cpu, memory) = match (resource.cpu_utilization, resource.memory_utilization) {
            (Some(cpu), Some(memory)) => (cpu, memory),
            _ => return None,
        };

        if cpu >= DOWNSIZE_CPU_THRESHOLD || memory >= DOWNSIZE_MEMORY_THRESHOLD {
            return None;
        }

        let savings = resource.monthly_cost * DOWNSIZE_SAVINGS_RATIO;
        let confidence = if savings > HIGH_CONFIDENCE_SAVINGS {
            Confidence::High
        } else {
            Confidence::Medium
        };

        Some(Recommendation {
            resource_id: resource.id,
            resource_name: resource.name.clone(),
            kind: RecommendationKind::DownsizeInstance,
            current_config: format!(
                "{} - {}% CPU, {}% Memory",
                resource.instance_type,
                metric(cpu),
                metric(memory)
            ),
            recommended_config: "Smaller instance type (50% less resources)".to_string(),
            reasoning: format!(
                "Low utilization detected: {}% CPU, {}% Memory",
                metric(cpu),
                metric(memory)
            ),
            monthly_savings: round2(savings),
            confidence,
        })
    }
}

/// Storage volumes above the size threshold should be shrunk
#[derive(Debug, Clone, Copy, Default)]
pub struct ShrinkOversizedStorage;

impl ShrinkOversizedStorage {
    /// Whole gigabytes to keep after shrinking
    pub fn target_size_gb(storage_gb: f64) -> i64 {
        (storage_gb * STORAGE_TARGET_RATIO).floor() as i64
    }
}

impl Rule for ShrinkOversizedStorage {
    fn name(&self) -> &'static str {
        "shrink_oversized_storage"
    }

    fn evaluate(&self, resource: &Resource) -> Option<Recommendation> {
        if resource.resource_type != ResourceType::Storage {
            return None;
        }

        let storage_gb = resource.storage_gb?;
        if storage_gb <= STORAGE_SIZE_THRESHOLD_GB {
            return None;
        }

        let savings = resource.monthly_cost * STORAGE_SAVINGS_RATIO;

        Some(Recommendation {
            resource_id: resource.id,
            resource_name: resource.name.clone(),
            kind: RecommendationKind::OptimizeStorage,
            current_config: format!("{}GB {}", metric(storage_gb), resource.instance_type),
            recommended_config: format!(
                "{}GB {}",
                Self::target_size_gb(storage_gb),
                resource.instance_type
            ),
            reasoning: format!("Large storage volume detected: {}GB", metric(storage_gb)),
            monthly_savings: round2(savings),
            confidence: Confidence::Medium,
        })
    }
}
