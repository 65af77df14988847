use std::sync::Arc;

use chrono::NaiveDate;

use crate::aging::ArAgingMetrics;
use crate::error::AnalyticsResult;
use crate::memo::MetricsCache;
use crate::models::Claim;
use crate::pipeline::{claim_status_distribution, StatusDistribution};
use crate::reporting::{revenue_summary, RevenueSummary};

/// Analytics service
///
/// Bundles the metric computations behind one entry point, memoizing the
/// aging profile (the one metric dashboards poll repeatedly with the same
/// inputs).
pub struct AnalyticsService {
    cache: MetricsCache,
}

impl AnalyticsService {
    /// Create a new analytics service
    pub fn new() -> Self {
        Self {
            cache: MetricsCache::new(),
        }
    }

    /// A/R aging profile as of the given report date.
    pub fn aging_metrics(&self, claims: &[Claim], as_of: NaiveDate) -> Arc<ArAgingMetrics> {
        self.cache.aging_metrics(claims, as_of)
    }

    /// Status distribution over the submission pipeline taxonomy.
    pub fn status_distribution(&self, claims: &[Claim]) -> StatusDistribution {
        claim_status_distribution(claims)
    }

    /// Revenue summary for a service-date period.
    pub fn revenue_summary(
        &self,
        claims: &[Claim],
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> AnalyticsResult<RevenueSummary> {
        revenue_summary(claims, period_start, period_end)
    }
}

impl Default for AnalyticsService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClaimStatus;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    #[test]
    fn test_service_smoke() {
        let service = AnalyticsService::new();
        let claims = vec![Claim {
            id: Uuid::new_v4(),
            claim_number: None,
            service_date: "2026-07-26".parse().unwrap(),
            total_charges: Decimal::from(100),
            status: ClaimStatus::Submitted,
            service_code: None,
            payer: None,
            created_at: None,
            updated_at: None,
        }];
        let as_of: NaiveDate = "2026-08-05".parse().unwrap();

        let aging = service.aging_metrics(&claims, as_of);
        assert_eq!(aging.days_in_ar, Some(10));

        let distribution = service.status_distribution(&claims);
        assert_eq!(distribution.total, 1);

        let summary = service
            .revenue_summary(&claims, "2026-07-01".parse().unwrap(), "2026-07-31".parse().unwrap())
            .unwrap();
        assert_eq!(summary.outstanding, Decimal::from(100));
    }
}
