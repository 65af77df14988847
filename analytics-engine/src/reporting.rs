use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::models::{Claim, ClaimStatus};

/// Claims without a service code roll up under this label.
const UNSPECIFIED_SERVICE: &str = "unspecified";

/// Revenue summary for a service-date period.
///
/// The disposition fields partition `total_charges`: `pending` covers
/// claims not yet submitted, `outstanding` covers claims in flight,
/// `collected` and `denied` cover the terminal dispositions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueSummary {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub total_charges: Decimal,
    pub pending: Decimal,
    pub outstanding: Decimal,
    pub collected: Decimal,
    pub denied: Decimal,
    pub by_service: Vec<ServiceRevenue>,
}

/// Service-code level rollup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRevenue {
    pub service_code: String,
    pub claim_count: u64,
    pub total_charges: Decimal,
    pub collected: Decimal,
}

/// Summarize revenue for claims whose service date falls inside the
/// inclusive period. Service-code rollups are emitted in code order.
pub fn revenue_summary(
    claims: &[Claim],
    period_start: NaiveDate,
    period_end: NaiveDate,
) -> AnalyticsResult<RevenueSummary> {
    if period_start > period_end {
        return Err(AnalyticsError::Validation(format!(
            "period start {period_start} is after period end {period_end}"
        )));
    }

    let mut summary = RevenueSummary {
        period_start,
        period_end,
        total_charges: Decimal::ZERO,
        pending: Decimal::ZERO,
        outstanding: Decimal::ZERO,
        collected: Decimal::ZERO,
        denied: Decimal::ZERO,
        by_service: Vec::new(),
    };
    let mut by_service: BTreeMap<&str, ServiceRevenue> = BTreeMap::new();

    for claim in claims
        .iter()
        .filter(|c| c.service_date >= period_start && c.service_date <= period_end)
    {
        summary.total_charges += claim.total_charges;
        match claim.status {
            ClaimStatus::Draft | ClaimStatus::Pending => summary.pending += claim.total_charges,
            ClaimStatus::Paid => summary.collected += claim.total_charges,
            ClaimStatus::Denied => summary.denied += claim.total_charges,
            _ => summary.outstanding += claim.total_charges,
        }

        let code = claim.service_code.as_deref().unwrap_or(UNSPECIFIED_SERVICE);
        let entry = by_service.entry(code).or_insert_with(|| ServiceRevenue {
            service_code: code.to_string(),
            claim_count: 0,
            total_charges: Decimal::ZERO,
            collected: Decimal::ZERO,
        });
        entry.claim_count += 1;
        entry.total_charges += claim.total_charges;
        if claim.status == ClaimStatus::Paid {
            entry.collected += claim.total_charges;
        }
    }

    summary.by_service = by_service.into_values().collect();
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn claim(date: &str, charges: &str, status: ClaimStatus, code: Option<&str>) -> Claim {
        Claim {
            id: Uuid::new_v4(),
            claim_number: None,
            service_date: date.parse().unwrap(),
            total_charges: charges.parse().unwrap(),
            status,
            service_code: code.map(str::to_string),
            payer: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn july() -> (NaiveDate, NaiveDate) {
        ("2026-07-01".parse().unwrap(), "2026-07-31".parse().unwrap())
    }

    #[test]
    fn test_dispositions_partition_total() {
        let (start, end) = july();
        let claims = vec![
            claim("2026-07-02", "100", ClaimStatus::Draft, None),
            claim("2026-07-05", "200", ClaimStatus::Submitted, None),
            claim("2026-07-09", "300", ClaimStatus::Paid, None),
            claim("2026-07-12", "400", ClaimStatus::Denied, None),
            claim("2026-07-15", "500", ClaimStatus::Appealed, None),
        ];
        let summary = revenue_summary(&claims, start, end).unwrap();
        assert_eq!(summary.total_charges, Decimal::from(1500));
        assert_eq!(summary.pending, Decimal::from(100));
        assert_eq!(summary.outstanding, Decimal::from(700));
        assert_eq!(summary.collected, Decimal::from(300));
        assert_eq!(summary.denied, Decimal::from(400));
        assert_eq!(
            summary.pending + summary.outstanding + summary.collected + summary.denied,
            summary.total_charges
        );
    }

    #[test]
    fn test_period_filter_is_inclusive() {
        let (start, end) = july();
        let claims = vec![
            claim("2026-06-30", "1", ClaimStatus::Paid, None),
            claim("2026-07-01", "2", ClaimStatus::Paid, None),
            claim("2026-07-31", "4", ClaimStatus::Paid, None),
            claim("2026-08-01", "8", ClaimStatus::Paid, None),
        ];
        let summary = revenue_summary(&claims, start, end).unwrap();
        assert_eq!(summary.total_charges, Decimal::from(6));
    }

    #[test]
    fn test_by_service_groups_in_code_order() {
        let (start, end) = july();
        let claims = vec![
            claim("2026-07-02", "50", ClaimStatus::Paid, Some("99214")),
            claim("2026-07-03", "75", ClaimStatus::Submitted, Some("99213")),
            claim("2026-07-04", "25", ClaimStatus::Submitted, Some("99214")),
            claim("2026-07-05", "10", ClaimStatus::Submitted, None),
        ];
        let summary = revenue_summary(&claims, start, end).unwrap();
        let codes: Vec<&str> = summary.by_service.iter().map(|s| s.service_code.as_str()).collect();
        assert_eq!(codes, vec!["99213", "99214", "unspecified"]);
        let code_99214 = &summary.by_service[1];
        assert_eq!(code_99214.claim_count, 2);
        assert_eq!(code_99214.total_charges, Decimal::from(75));
        assert_eq!(code_99214.collected, Decimal::from(50));
    }

    #[test]
    fn test_inverted_period_is_an_error() {
        let (start, end) = july();
        assert!(revenue_summary(&[], end, start).is_err());
        assert!(revenue_summary(&[], start, start).is_ok());
    }

    #[test]
    fn test_empty_claims_yield_zero_summary() {
        let (start, end) = july();
        let summary = revenue_summary(&[], start, end).unwrap();
        assert_eq!(summary.total_charges, Decimal::ZERO);
        assert!(summary.by_service.is_empty());
    }
}
