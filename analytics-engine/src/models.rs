use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Insurance claim as seen by the analytics pipeline.
///
/// Aging math uses `service_date`, never the audit timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Claim {
    pub id: Uuid,
    pub claim_number: Option<String>,
    pub service_date: NaiveDate,
    pub total_charges: Decimal,
    pub status: ClaimStatus,
    pub service_code: Option<String>,
    pub payer: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Claim status
///
/// Covers the lifecycle statuses plus the clearinghouse intermediates that
/// upstream systems report between submission and adjudication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClaimStatus {
    Draft,
    Pending,
    Submitted,
    Processing,
    Accepted,
    Rejected,
    Denied,
    Paid,
    Appealed,
    /// Unrecognized upstream status code
    Unknown,
}

impl serde::Serialize for ClaimStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// Deserialization is total: the raw vocabulary is a superset of the enum,
// so unrecognized codes normalize to `Unknown` instead of failing.
impl<'de> serde::Deserialize<'de> for ClaimStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(ClaimStatus::from_raw(&raw))
    }
}

impl ClaimStatus {
    /// Terminal statuses no longer represent receivable risk.
    pub fn is_terminal(self) -> bool {
        matches!(self, ClaimStatus::Paid | ClaimStatus::Denied)
    }

    /// Non-terminal claims still count toward outstanding A/R.
    pub fn is_outstanding(self) -> bool {
        !self.is_terminal()
    }

    /// Normalize a raw upstream status code.
    ///
    /// The raw vocabulary is a superset of the enum: clearinghouse
    /// sub-statuses collapse into `Processing`, anything unrecognized
    /// becomes `Unknown` rather than being dropped.
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "draft" => ClaimStatus::Draft,
            "pending" | "ready" => ClaimStatus::Pending,
            "submitted" | "queued" => ClaimStatus::Submitted,
            "processing" | "acknowledged" | "clearinghouse_received" | "payer_received" => {
                ClaimStatus::Processing
            }
            "accepted" | "approved" => ClaimStatus::Accepted,
            "rejected" | "clearinghouse_rejected" => ClaimStatus::Rejected,
            "denied" => ClaimStatus::Denied,
            "paid" => ClaimStatus::Paid,
            "appealed" => ClaimStatus::Appealed,
            _ => ClaimStatus::Unknown,
        }
    }

    /// Canonical snake_case code, matching the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            ClaimStatus::Draft => "draft",
            ClaimStatus::Pending => "pending",
            ClaimStatus::Submitted => "submitted",
            ClaimStatus::Processing => "processing",
            ClaimStatus::Accepted => "accepted",
            ClaimStatus::Rejected => "rejected",
            ClaimStatus::Denied => "denied",
            ClaimStatus::Paid => "paid",
            ClaimStatus::Appealed => "appealed",
            ClaimStatus::Unknown => "unknown",
        }
    }
}
