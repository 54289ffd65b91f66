mod builder;
mod cache;
mod clock;
pub(crate) mod listing;

pub use builder::{build_catalog, BuildOptions, FailurePolicy};
pub use cache::CatalogCache;
pub use clock::{Clock, SystemClock};
pub use listing::Listing;

#[cfg(test)]
pub use clock::ManualClock;

use crate::rentvine::GatewayError;
use chrono::{DateTime, Utc};
use std::fmt;
use thiserror::Error;

/// Every listing the backend knew about at `built_at`.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub listings: Vec<Listing>,
    /// Requests that failed but were absorbed under `FailurePolicy::TreatAsEmpty`.
    pub failures: Vec<FetchFailure>,
    pub built_at: DateTime<Utc>,
}

impl Catalog {
    /// True when some properties or units are missing because a fetch failed.
    pub fn is_degraded(&self) -> bool {
        !self.failures.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchTarget {
    Properties,
    Units(i64),
}

impl fmt::Display for FetchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchTarget::Properties => write!(f, "properties"),
            FetchTarget::Units(id) => write!(f, "units of property {id}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FetchFailure {
    pub target: FetchTarget,
    pub error: String,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog build aborted, fetching {target} failed: {source}")]
    Incomplete {
        target: FetchTarget,
        source: GatewayError,
    },
}
