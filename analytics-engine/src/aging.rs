use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::models::Claim;

/// Age band for an outstanding claim, by whole days since the service date.
///
/// Bands are mutually exclusive and cover `[0, inf)`: `[0,30]`, `[31,60]`,
/// `[61,90]`, `(90, inf)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeBand {
    Days0To30,
    Days31To60,
    Days61To90,
    Days91Plus,
}

impl AgeBand {
    /// Classify a non-negative day count into its band. First match wins.
    pub fn classify(days: i64) -> Self {
        if days <= 30 {
            AgeBand::Days0To30
        } else if days <= 60 {
            AgeBand::Days31To60
        } else if days <= 90 {
            AgeBand::Days61To90
        } else {
            AgeBand::Days91Plus
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AgeBand::Days0To30 => "0-30",
            AgeBand::Days31To60 => "31-60",
            AgeBand::Days61To90 => "61-90",
            AgeBand::Days91Plus => "90+",
        }
    }
}

/// Dollar totals per age band.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AgingBuckets {
    #[serde(rename = "0-30")]
    pub age_0_30: Decimal,
    #[serde(rename = "31-60")]
    pub age_31_60: Decimal,
    #[serde(rename = "61-90")]
    pub age_61_90: Decimal,
    #[serde(rename = "90+")]
    pub age_91_plus: Decimal,
}

/// Claim counts per age band.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AgingCounts {
    #[serde(rename = "0-30")]
    pub age_0_30: u64,
    #[serde(rename = "31-60")]
    pub age_31_60: u64,
    #[serde(rename = "61-90")]
    pub age_61_90: u64,
    #[serde(rename = "90+")]
    pub age_91_plus: u64,
}

/// Accounts receivable aging profile.
///
/// `days_in_ar` and `max_days_outstanding` are `None` (JSON `null`) when no
/// outstanding claims were aged: `null` signals "no data", zero would read
/// as "claims aged zero days".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArAgingMetrics {
    #[serde(rename = "daysInAR")]
    pub days_in_ar: Option<i64>,
    pub max_days_outstanding: Option<i64>,
    pub aging_buckets: AgingBuckets,
    pub aging_counts: AgingCounts,
    #[serde(rename = "totalOutstandingAR")]
    pub total_outstanding_ar: Decimal,
}

/// Whole days the claim has been outstanding as of the report date.
///
/// Future service dates clamp to 0 rather than producing a negative age.
pub fn days_outstanding(service_date: NaiveDate, as_of: NaiveDate) -> i64 {
    (as_of - service_date).num_days().max(0)
}

/// Compute the A/R aging profile for a set of claims.
///
/// Terminal claims (paid, denied) are filtered out first; everything else
/// still represents receivable risk and is aged. Bucket dollar totals sum
/// to `total_outstanding_ar` exactly and bucket counts sum to the number of
/// aged claims.
pub fn compute_aging_metrics(claims: &[Claim], as_of: NaiveDate) -> ArAgingMetrics {
    let mut buckets = AgingBuckets::default();
    let mut counts = AgingCounts::default();
    let mut total_outstanding_ar = Decimal::ZERO;
    let mut day_sum: i64 = 0;
    let mut day_max: Option<i64> = None;
    let mut aged: u64 = 0;

    for claim in claims.iter().filter(|c| c.status.is_outstanding()) {
        let days = days_outstanding(claim.service_date, as_of);
        match AgeBand::classify(days) {
            AgeBand::Days0To30 => {
                buckets.age_0_30 += claim.total_charges;
                counts.age_0_30 += 1;
            }
            AgeBand::Days31To60 => {
                buckets.age_31_60 += claim.total_charges;
                counts.age_31_60 += 1;
            }
            AgeBand::Days61To90 => {
                buckets.age_61_90 += claim.total_charges;
                counts.age_61_90 += 1;
            }
            AgeBand::Days91Plus => {
                buckets.age_91_plus += claim.total_charges;
                counts.age_91_plus += 1;
            }
        }
        total_outstanding_ar += claim.total_charges;
        day_sum += days;
        day_max = Some(day_max.map_or(days, |m| m.max(days)));
        aged += 1;
    }

    let days_in_ar = if aged > 0 {
        Some(round_half_up_ratio(day_sum, aged as i64))
    } else {
        None
    };

    tracing::debug!(
        input = claims.len(),
        aged,
        %total_outstanding_ar,
        "computed A/R aging metrics"
    );

    ArAgingMetrics {
        days_in_ar,
        max_days_outstanding: day_max,
        aging_buckets: buckets,
        aging_counts: counts,
        total_outstanding_ar,
    }
}

/// Round-half-up integer ratio for non-negative inputs.
fn round_half_up_ratio(numerator: i64, denominator: i64) -> i64 {
    (Decimal::from(numerator) / Decimal::from(denominator))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or_default()
}
