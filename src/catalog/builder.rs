// src/catalog/builder.rs
use crate::catalog::{Catalog, CatalogError, FetchFailure, FetchTarget, Listing};
use crate::rentvine::{Fetched, GatewayError, PropertyGateway, PropertyRecord, UnitRecord};
use chrono::{DateTime, Utc};
use std::str::FromStr;

/// What to do when a properties/units request fails (transport, HTTP status,
/// unreadable body) or when single records in a response cannot be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Log it, record it on the catalog, and carry on without the missing
    /// records.
    #[default]
    TreatAsEmpty,
    /// Abort the build; nothing gets cached.
    Strict,
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "empty" | "treat_as_empty" => Ok(FailurePolicy::TreatAsEmpty),
            "strict" => Ok(FailurePolicy::Strict),
            other => Err(format!("unknown failure policy {other:?} (expected empty|strict)")),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BuildOptions {
    pub failure_policy: FailurePolicy,
    /// Max unit requests in flight. 1 keeps the build strictly serial.
    pub fetch_concurrency: usize,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            failure_policy: FailurePolicy::TreatAsEmpty,
            fetch_concurrency: 1,
        }
    }
}

/// Fetch every property, then every property's units, and join them into
/// listings. Output order is property-fetch order, then unit-fetch order,
/// whatever `fetch_concurrency` is.
pub fn build_catalog<G>(
    gateway: &G,
    options: &BuildOptions,
    built_at: DateTime<Utc>,
) -> Result<Catalog, CatalogError>
where
    G: PropertyGateway + ?Sized,
{
    let policy = options.failure_policy;
    let mut failures = Vec::new();

    let properties = settle(
        FetchTarget::Properties,
        gateway.fetch_properties(),
        policy,
        &mut failures,
    )?;

    tracing::info!(properties = properties.len(), "Fetched properties");

    let unit_batches = fetch_all_units(gateway, &properties, options.fetch_concurrency);

    let mut listings = Vec::new();
    for (property, result) in properties.iter().zip(unit_batches) {
        let target = FetchTarget::Units(property.property_id);
        let units = settle(target, result, policy, &mut failures)?;
        listings.extend(units.into_iter().map(|unit| Listing::unify(property, unit)));
    }

    if failures.is_empty() {
        tracing::info!(listings = listings.len(), "Catalog built");
    } else {
        tracing::warn!(
            listings = listings.len(),
            failures = failures.len(),
            "Catalog built with missing data"
        );
    }

    Ok(Catalog {
        listings,
        failures,
        built_at,
    })
}

/// Keep whatever records one response produced. A failed request counts as
/// no records; each rejected element is one more failure.
fn settle<T>(
    target: FetchTarget,
    result: Result<Fetched<T>, GatewayError>,
    policy: FailurePolicy,
    failures: &mut Vec<FetchFailure>,
) -> Result<Vec<T>, CatalogError> {
    let fetched = match result {
        Ok(fetched) => fetched,
        Err(e) => {
            absorb(target, e, policy, failures)?;
            return Ok(Vec::new());
        }
    };

    for reason in fetched.rejected {
        let error = GatewayError::Decode(format!("skipped record, {reason}"));
        absorb(target, error, policy, failures)?;
    }

    Ok(fetched.records)
}

fn absorb(
    target: FetchTarget,
    error: GatewayError,
    policy: FailurePolicy,
    failures: &mut Vec<FetchFailure>,
) -> Result<(), CatalogError> {
    match policy {
        FailurePolicy::Strict => Err(CatalogError::Incomplete {
            target,
            source: error,
        }),
        FailurePolicy::TreatAsEmpty => {
            tracing::warn!(%target, error = %error, "Rentvine data missing, continuing without it");
            failures.push(FetchFailure {
                target,
                error: error.to_string(),
            });
            Ok(())
        }
    }
}

fn fetch_all_units<G>(
    gateway: &G,
    properties: &[PropertyRecord],
    concurrency: usize,
) -> Vec<Result<Fetched<UnitRecord>, GatewayError>>
where
    G: PropertyGateway + ?Sized,
{
    if concurrency <= 1 {
        return properties
            .iter()
            .map(|p| gateway.fetch_units(p.property_id))
            .collect();
    }

    // Chunks run one after another; within a chunk each property gets its own
    // scoped thread and results are joined back in chunk order.
    let mut results = Vec::with_capacity(properties.len());
    for chunk in properties.chunks(concurrency) {
        std::thread::scope(|s| {
            let handles: Vec<_> = chunk
                .iter()
                .map(|p| s.spawn(move || gateway.fetch_units(p.property_id)))
                .collect();

            for handle in handles {
                let result = handle.join().unwrap_or_else(|_| {
                    Err(GatewayError::Transport("unit fetch thread panicked".into()))
                });
                results.push(result);
            }
        });
    }
    results
}
