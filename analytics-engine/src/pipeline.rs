use std::collections::HashMap;

use itertools::Itertools;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::models::{Claim, ClaimStatus};

/// Reporting taxonomy for the claim submission pipeline.
///
/// A fixed, closed set: the raw status vocabulary is wider, and several
/// upstream codes collapse into one stage. `Other` catches anything the
/// mapping does not recognize so that totals always reconcile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Pending,
    Submitted,
    Accepted,
    Rejected,
    Denied,
    Paid,
    Other,
}

impl PipelineStage {
    /// Every stage, in the order buckets are emitted. The order is fixed so
    /// consumers can rely on array positions across calls.
    pub const ALL: [PipelineStage; 7] = [
        PipelineStage::Pending,
        PipelineStage::Submitted,
        PipelineStage::Accepted,
        PipelineStage::Rejected,
        PipelineStage::Denied,
        PipelineStage::Paid,
        PipelineStage::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PipelineStage::Pending => "pending",
            PipelineStage::Submitted => "submitted",
            PipelineStage::Accepted => "accepted",
            PipelineStage::Rejected => "rejected",
            PipelineStage::Denied => "denied",
            PipelineStage::Paid => "paid",
            PipelineStage::Other => "other",
        }
    }
}

impl From<ClaimStatus> for PipelineStage {
    fn from(status: ClaimStatus) -> Self {
        match status {
            ClaimStatus::Draft | ClaimStatus::Pending => PipelineStage::Pending,
            ClaimStatus::Submitted | ClaimStatus::Processing => PipelineStage::Submitted,
            ClaimStatus::Accepted => PipelineStage::Accepted,
            ClaimStatus::Rejected => PipelineStage::Rejected,
            // An appeal contests a denial; the funnel reports it with denials.
            ClaimStatus::Denied | ClaimStatus::Appealed => PipelineStage::Denied,
            ClaimStatus::Paid => PipelineStage::Paid,
            ClaimStatus::Unknown => PipelineStage::Other,
        }
    }
}

/// One taxonomy bucket of the distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageBucket {
    pub label: &'static str,
    pub count: u64,
    pub percentage: u64,
}

/// Status distribution over the fixed pipeline taxonomy.
///
/// Every stage appears exactly once, in `PipelineStage::ALL` order, zero
/// counts included. Percentages round independently and therefore need not
/// sum to exactly 100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusDistribution {
    pub buckets: Vec<StageBucket>,
    pub total: u64,
}

/// Aggregate raw status strings into the pipeline taxonomy.
///
/// One pass over the input; unrecognized statuses count under `other`.
pub fn compute_status_distribution<I, S>(statuses: I) -> StatusDistribution
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let counts = statuses
        .into_iter()
        .map(|raw| PipelineStage::from(ClaimStatus::from_raw(raw.as_ref())))
        .counts();
    distribution_from_counts(&counts)
}

/// Aggregate typed claims into the pipeline taxonomy.
pub fn claim_status_distribution(claims: &[Claim]) -> StatusDistribution {
    let counts = claims
        .iter()
        .map(|claim| PipelineStage::from(claim.status))
        .counts();
    distribution_from_counts(&counts)
}

fn distribution_from_counts(counts: &HashMap<PipelineStage, usize>) -> StatusDistribution {
    let total = counts.values().map(|&count| count as u64).sum();
    let buckets = PipelineStage::ALL
        .iter()
        .map(|stage| {
            let count = counts.get(stage).copied().unwrap_or(0) as u64;
            StageBucket {
                label: stage.label(),
                count,
                percentage: percentage(count, total),
            }
        })
        .collect();
    StatusDistribution { buckets, total }
}

/// Round-half-up percentage; a zero total short-circuits to 0.
fn percentage(count: u64, total: u64) -> u64 {
    if total == 0 {
        return 0;
    }
    (Decimal::from(count * 100) / Decimal::from(total))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .unwrap_or_default()
}
