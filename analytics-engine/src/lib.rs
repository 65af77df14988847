//! Revenue-cycle analytics for healthcare claims
//!
//! Provides the reporting computations behind an RCM dashboard:
//! - Accounts receivable aging (outstanding dollars bucketed by days outstanding)
//! - Claim submission pipeline / status distribution
//! - Revenue summaries by disposition and service code
//! - Boundary coercion of loosely-typed claim rows
//! - Memoized metric computation
//!
//! All computations are pure, synchronous functions over claims already
//! loaded into memory. Fetching the claims (database I/O) and serving the
//! results (HTTP) belong to the callers.

pub mod aging;
pub mod error;
pub mod ingest;
pub mod memo;
pub mod models;
pub mod pipeline;
pub mod reporting;
pub mod service;

pub use aging::*;
pub use error::*;
pub use ingest::*;
pub use memo::*;
pub use models::*;
pub use pipeline::*;
pub use reporting::*;
pub use service::*;
