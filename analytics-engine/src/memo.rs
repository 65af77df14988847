use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use chrono::NaiveDate;
use parking_lot::RwLock;

use crate::aging::{compute_aging_metrics, ArAgingMetrics};
use crate::models::Claim;

/// Explicit memoization of aging metrics, keyed by a 64-bit fingerprint of
/// the claim list and the as-of date.
///
/// Each computation allocates fresh accumulators; the cache map is the only
/// shared state and is internally synchronized, so one cache can serve
/// concurrent callers. Entries live for the lifetime of the cache and are
/// never persisted.
#[derive(Debug, Default)]
pub struct MetricsCache {
    aging: RwLock<HashMap<u64, Arc<ArAgingMetrics>>>,
}

impl MetricsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aging metrics for the given claims, computed at most once per
    /// distinct `(claims, as_of)` input.
    pub fn aging_metrics(&self, claims: &[Claim], as_of: NaiveDate) -> Arc<ArAgingMetrics> {
        let key = fingerprint(claims, as_of);
        if let Some(hit) = self.aging.read().get(&key) {
            tracing::debug!(key, "aging metrics cache hit");
            return Arc::clone(hit);
        }
        let mut cache = self.aging.write();
        Arc::clone(
            cache
                .entry(key)
                .or_insert_with(|| Arc::new(compute_aging_metrics(claims, as_of))),
        )
    }

    /// Number of memoized results.
    pub fn len(&self) -> usize {
        self.aging.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.aging.read().is_empty()
    }

    /// Drop all memoized results.
    pub fn clear(&self) {
        self.aging.write().clear();
    }
}

fn fingerprint(claims: &[Claim], as_of: NaiveDate) -> u64 {
    let mut hasher = DefaultHasher::new();
    claims.hash(&mut hasher);
    as_of.hash(&mut hasher);
    hasher.finish()
}
