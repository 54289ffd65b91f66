// src/query/address.rs

use crate::catalog::Listing;

/// Lower-case and trim; this is all the normalisation address lookups get.
pub fn normalize(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Loose containment in either direction.
///
/// This is a heuristic, not exact matching: "123 main" finds
/// "123 Main St", and "123 Main St Apt 4 Austin" finds "123 Main St".
/// It also means very short queries ("1") match almost anything; callers
/// get the first hit in catalog order. `query` must already be normalised.
pub fn addresses_match(query: &str, candidate: &str) -> bool {
    if query.is_empty() {
        return false;
    }
    let candidate = candidate.to_lowercase();
    candidate.contains(query) || (!candidate.is_empty() && query.contains(candidate.as_str()))
}

/// Checks the raw unit address, the display address and the full address.
pub fn listing_matches(query: &str, listing: &Listing) -> bool {
    [
        listing.unit.address.as_str(),
        listing.display_address.as_str(),
        listing.full_address.as_str(),
    ]
    .into_iter()
    .any(|candidate| addresses_match(query, candidate))
}
