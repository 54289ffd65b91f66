// src/query/engine.rs
use crate::catalog::{CatalogCache, CatalogError, Listing};
use crate::query::address::{listing_matches, normalize};
use crate::query::filter::{apply_filters, FilterSpec};
use crate::query::format::ListingView;
use std::sync::Arc;

/// A validated request against the catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyQuery {
    Details { address: String },
    Available(FilterSpec),
    Search(FilterSpec),
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    Found(ListingView),
    NotFound,
    Results(Vec<ListingView>),
}

/// Read-only queries over the cached catalog.
#[derive(Clone)]
pub struct PropertyService {
    cache: Arc<CatalogCache>,
}

impl PropertyService {
    pub fn new(cache: Arc<CatalogCache>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &CatalogCache {
        &self.cache
    }

    pub fn execute(&self, query: &PropertyQuery) -> Result<QueryOutcome, CatalogError> {
        Ok(match query {
            PropertyQuery::Details { address } => match self.find_by_address(address)? {
                Some(view) => QueryOutcome::Found(view),
                None => QueryOutcome::NotFound,
            },
            PropertyQuery::Available(filter) => QueryOutcome::Results(self.list_available(filter)?),
            PropertyQuery::Search(filter) => QueryOutcome::Results(self.search(filter)?),
        })
    }

    /// First listing, in catalog order, whose address loosely matches `query`.
    pub fn find_by_address(&self, query: &str) -> Result<Option<ListingView>, CatalogError> {
        let catalog = self.cache.get_catalog()?;
        let query = normalize(query);

        let found = catalog
            .listings
            .iter()
            .find(|listing| listing_matches(&query, listing));

        tracing::debug!(query = %query, found = found.is_some(), "Address lookup");
        Ok(found.map(ListingView::from))
    }

    /// Vacant listings only.
    pub fn list_available(&self, filter: &FilterSpec) -> Result<Vec<ListingView>, CatalogError> {
        let catalog = self.cache.get_catalog()?;
        let vacant = catalog.listings.iter().filter(|l| l.is_vacant);
        Ok(to_views(apply_filters(vacant, filter)))
    }

    /// Vacant and occupied listings.
    pub fn search(&self, filter: &FilterSpec) -> Result<Vec<ListingView>, CatalogError> {
        let catalog = self.cache.get_catalog()?;
        Ok(to_views(apply_filters(&catalog.listings, filter)))
    }
}

fn to_views(listings: Vec<&Listing>) -> Vec<ListingView> {
    listings.into_iter().map(ListingView::from).collect()
}
