use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::error::AnalyticsResult;
use crate::models::{Claim, ClaimStatus};

/// Loosely-typed claim row as it arrives from upstream storage.
///
/// Every field is optional and tolerates the wrong JSON type: a field that
/// fails to deserialize becomes `None` instead of failing the whole row.
/// Coercion into [`Claim`] happens in [`coerce_claims`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClaimRecord {
    #[serde(deserialize_with = "lenient")]
    pub id: Option<Uuid>,
    #[serde(alias = "claimNumber", deserialize_with = "lenient")]
    pub claim_number: Option<String>,
    #[serde(alias = "serviceDate", deserialize_with = "lenient")]
    pub service_date: Option<String>,
    #[serde(alias = "totalCharges", deserialize_with = "lenient")]
    pub total_charges: Option<Decimal>,
    #[serde(deserialize_with = "lenient")]
    pub status: Option<String>,
    #[serde(alias = "serviceCode", deserialize_with = "lenient")]
    pub service_code: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub payer: Option<String>,
    #[serde(alias = "createdAt", deserialize_with = "lenient")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(alias = "updatedAt", deserialize_with = "lenient")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Outcome counters for one coercion pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
    /// Records coerced into claims.
    pub accepted: usize,
    /// Records dropped for a missing or unparseable id or service date.
    pub skipped: usize,
    /// Accepted records whose charge amount was substituted with zero.
    pub coerced_charges: usize,
}

/// Deserialize a field, mapping any shape mismatch to `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Parse a service date from the formats upstream rows carry: a plain ISO
/// date, an RFC 3339 timestamp, or a space-separated timestamp.
fn parse_service_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|dt| dt.date_naive())
        })
        .or_else(|| {
            NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}

/// Coerce raw rows into claims with one consistent malformed-input policy:
///
/// - missing/unparseable `id` or `service_date`: the row is skipped and
///   logged, never an error;
/// - absent, unparseable, or negative `total_charges`: coerced to zero;
/// - missing or unrecognized `status`: kept as [`ClaimStatus::Unknown`], so
///   the claim still counts (conservatively, as outstanding).
pub fn coerce_claims<I>(records: I) -> (Vec<Claim>, IngestSummary)
where
    I: IntoIterator<Item = ClaimRecord>,
{
    let mut summary = IngestSummary::default();
    let mut claims = Vec::new();

    for record in records {
        let Some(id) = record.id else {
            tracing::warn!("skipping claim record with missing or invalid id");
            summary.skipped += 1;
            continue;
        };
        let Some(service_date) = record.service_date.as_deref().and_then(parse_service_date)
        else {
            tracing::warn!(claim_id = %id, "skipping claim record with missing or invalid service date");
            summary.skipped += 1;
            continue;
        };

        let total_charges = match record.total_charges {
            Some(amount) if amount >= Decimal::ZERO => amount,
            Some(amount) => {
                tracing::warn!(claim_id = %id, %amount, "negative charge amount coerced to zero");
                summary.coerced_charges += 1;
                Decimal::ZERO
            }
            None => {
                tracing::warn!(claim_id = %id, "missing or invalid charge amount coerced to zero");
                summary.coerced_charges += 1;
                Decimal::ZERO
            }
        };

        let status = record
            .status
            .as_deref()
            .map_or(ClaimStatus::Unknown, ClaimStatus::from_raw);

        claims.push(Claim {
            id,
            claim_number: record.claim_number,
            service_date,
            total_charges,
            status,
            service_code: record.service_code,
            payer: record.payer,
            created_at: record.created_at,
            updated_at: record.updated_at,
        });
        summary.accepted += 1;
    }

    tracing::debug!(
        accepted = summary.accepted,
        skipped = summary.skipped,
        coerced_charges = summary.coerced_charges,
        "coerced claim records"
    );
    (claims, summary)
}

/// Parse a JSON array of claim rows.
///
/// A payload that is not an array of objects is caller misuse and surfaces
/// as an error; per-row data-quality problems do not.
pub fn records_from_json(payload: &str) -> AnalyticsResult<Vec<ClaimRecord>> {
    Ok(serde_json::from_str(payload)?)
}

/// Parse and coerce a JSON array of claim rows in one step.
pub fn claims_from_json(payload: &str) -> AnalyticsResult<(Vec<Claim>, IngestSummary)> {
    Ok(coerce_claims(records_from_json(payload)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: serde_json::Value) -> ClaimRecord {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_coerce_well_formed_record() {
        let (claims, summary) = coerce_claims([record(serde_json::json!({
            "id": "4f5e9a9e-0a59-4b1c-9c25-5b3f4f6e9d10",
            "claim_number": "CLM-1001",
            "service_date": "2026-07-01",
            "total_charges": "125.50",
            "status": "submitted",
            "service_code": "99213",
            "payer": "Acme Health"
        }))]);
        assert_eq!(summary, IngestSummary { accepted: 1, skipped: 0, coerced_charges: 0 });
        assert_eq!(claims[0].total_charges, "125.50".parse::<Decimal>().unwrap());
        assert_eq!(claims[0].status, ClaimStatus::Submitted);
        assert_eq!(claims[0].service_date, NaiveDate::from_ymd_opt(2026, 7, 1).unwrap());
    }

    #[test]
    fn test_camel_case_aliases() {
        let (claims, _) = coerce_claims([record(serde_json::json!({
            "id": "4f5e9a9e-0a59-4b1c-9c25-5b3f4f6e9d10",
            "serviceDate": "2026-07-01",
            "totalCharges": 99.95,
            "status": "pending"
        }))]);
        assert_eq!(claims.len(), 1);
        assert_eq!(claims[0].total_charges, "99.95".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_missing_service_date_skips_record() {
        let (claims, summary) = coerce_claims([record(serde_json::json!({
            "id": "4f5e9a9e-0a59-4b1c-9c25-5b3f4f6e9d10",
            "total_charges": 10,
            "status": "pending"
        }))]);
        assert!(claims.is_empty());
        assert_eq!(summary.skipped, 1);
    }

    #[test]
    fn test_invalid_id_skips_record() {
        let (claims, summary) = coerce_claims([record(serde_json::json!({
            "id": "not-a-uuid",
            "service_date": "2026-07-01"
        }))]);
        assert!(claims.is_empty());
        assert_eq!(summary.skipped, 1);
    }

    #[test]
    fn test_charge_coercion_policy() {
        let base = |charges: serde_json::Value| {
            record(serde_json::json!({
                "id": "4f5e9a9e-0a59-4b1c-9c25-5b3f4f6e9d10",
                "service_date": "2026-07-01",
                "total_charges": charges,
                "status": "pending"
            }))
        };
        let (claims, summary) = coerce_claims([
            base(serde_json::json!("not a number")),
            base(serde_json::json!(-25)),
            base(serde_json::json!(null)),
        ]);
        assert_eq!(claims.len(), 3);
        assert!(claims.iter().all(|c| c.total_charges == Decimal::ZERO));
        assert_eq!(summary.coerced_charges, 3);
    }

    #[test]
    fn test_wrong_typed_field_does_not_fail_row() {
        let (claims, summary) = coerce_claims([record(serde_json::json!({
            "id": "4f5e9a9e-0a59-4b1c-9c25-5b3f4f6e9d10",
            "service_date": "2026-07-01",
            "status": 42,
            "payer": { "nested": true }
        }))]);
        assert_eq!(claims.len(), 1);
        assert_eq!(claims[0].status, ClaimStatus::Unknown);
        assert_eq!(claims[0].payer, None);
        assert_eq!(summary.coerced_charges, 1);
    }

    #[test]
    fn test_timestamp_service_dates() {
        let (claims, _) = coerce_claims([
            record(serde_json::json!({
                "id": "4f5e9a9e-0a59-4b1c-9c25-5b3f4f6e9d10",
                "service_date": "2026-07-01T14:30:00+00:00",
                "total_charges": 1
            })),
            record(serde_json::json!({
                "id": "1b5e9a9e-0a59-4b1c-9c25-5b3f4f6e9d10",
                "service_date": "2026-07-02 09:00:00",
                "total_charges": 1
            })),
        ]);
        assert_eq!(claims[0].service_date, NaiveDate::from_ymd_opt(2026, 7, 1).unwrap());
        assert_eq!(claims[1].service_date, NaiveDate::from_ymd_opt(2026, 7, 2).unwrap());
    }

    #[test]
    fn test_non_array_payload_is_an_error() {
        assert!(claims_from_json("{\"not\": \"an array\"}").is_err());
        assert!(claims_from_json("[]").is_ok());
    }
}
