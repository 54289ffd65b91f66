pub mod models;
pub mod replies;

pub use models::{CatalogStatus, PropertyQueryRequest, PropertyResponse, QueryType};

use crate::query::{PropertyQuery, PropertyService, QueryOutcome};

/// Turn an assistant request into a reply. Never fails: catalog errors come
/// back as a fallback message with `success: false`.
pub fn answer(service: &PropertyService, request: &PropertyQueryRequest) -> PropertyResponse {
    let kind: QueryType = match request.query_type.parse() {
        Ok(kind) => kind,
        Err(unknown) => {
            tracing::warn!(query_type = %unknown, "Unknown query type");
            return replies::unknown_query_type();
        }
    };

    let query = match kind {
        QueryType::PropertyDetails => match request.address() {
            Some(address) => PropertyQuery::Details { address },
            None => return replies::missing_address(),
        },
        QueryType::AvailableListings => PropertyQuery::Available(request.filter()),
        QueryType::Search => PropertyQuery::Search(request.filter()),
        QueryType::BudgetFilter => PropertyQuery::Available(request.budget_filter()),
    };

    let outcome = match service.execute(&query) {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!(error = %e, ?kind, "Property query failed");
            return replies::unavailable(&e.to_string());
        }
    };

    match (kind, outcome) {
        (_, QueryOutcome::Found(view)) => replies::details(&request.user_message, view),
        (_, QueryOutcome::NotFound) => {
            replies::not_found(request.address.as_deref().unwrap_or_default().trim())
        }
        (QueryType::Search, QueryOutcome::Results(views)) => replies::search(views),
        (QueryType::BudgetFilter, QueryOutcome::Results(views)) => replies::budget(request, views),
        (_, QueryOutcome::Results(views)) => replies::available(views),
    }
}
