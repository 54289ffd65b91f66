use crate::catalog::Catalog;
use crate::query::{FilterSpec, ListingView};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryType {
    PropertyDetails,
    AvailableListings,
    Search,
    BudgetFilter,
}

impl FromStr for QueryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "property_details" | "details" => Ok(QueryType::PropertyDetails),
            "available_listings" | "availableListings" => Ok(QueryType::AvailableListings),
            "search" => Ok(QueryType::Search),
            "budget_filter" | "budgetFilter" => Ok(QueryType::BudgetFilter),
            other => Err(other.to_string()),
        }
    }
}

/// Body of `POST /api/property-query`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropertyQueryRequest {
    /// Kept as text so an unknown type gets a polite reply instead of a 400.
    pub query_type: String,
    pub user_message: String,
    pub address: Option<String>,
    pub min_rent: Option<f64>,
    pub max_rent: Option<f64>,
    pub beds: Option<i64>,
    pub city: Option<String>,
}

impl PropertyQueryRequest {
    /// Zero amounts and blank strings count as "not given".
    pub fn filter(&self) -> FilterSpec {
        FilterSpec {
            min_rent: self.min_rent(),
            max_rent: self.max_rent(),
            min_beds: self.beds.filter(|b| *b != 0),
            city: non_blank(self.city.as_deref()),
        }
    }

    /// Budget queries only look at the rent range.
    pub fn budget_filter(&self) -> FilterSpec {
        FilterSpec::rent_range(self.min_rent(), self.max_rent())
    }

    pub fn address(&self) -> Option<String> {
        non_blank(self.address.as_deref())
    }

    pub fn min_rent(&self) -> Option<f64> {
        self.min_rent.filter(|v| *v != 0.0)
    }

    pub fn max_rent(&self) -> Option<f64> {
        self.max_rent.filter(|v| *v != 0.0)
    }
}

fn non_blank(s: Option<&str>) -> Option<String> {
    s.map(str::trim).filter(|s| !s.is_empty()).map(String::from)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseData {
    Listing(ListingView),
    Listings { properties: Vec<ListingView> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyResponse {
    pub success: bool,
    pub property_found: Option<bool>,
    pub data: Option<ResponseData>,
    pub response_text: String,
    pub error: Option<String>,
}

impl PropertyResponse {
    pub fn ok(response_text: impl Into<String>) -> Self {
        Self {
            success: true,
            property_found: None,
            data: None,
            response_text: response_text.into(),
            error: None,
        }
    }

    pub fn failed(response_text: impl Into<String>) -> Self {
        Self {
            success: false,
            ..Self::ok(response_text)
        }
    }

    pub fn with_data(mut self, data: ResponseData) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

#[derive(Debug, Serialize)]
pub struct FailureView {
    pub target: String,
    pub error: String,
}

/// Body of `GET /api/catalog` and `POST /api/catalog/refresh`.
#[derive(Debug, Default, Serialize)]
pub struct CatalogStatus {
    pub built: bool,
    pub listings: usize,
    pub vacant: usize,
    pub built_at: Option<DateTime<Utc>>,
    pub degraded: bool,
    pub failures: Vec<FailureView>,
    pub error: Option<String>,
}

impl From<&Catalog> for CatalogStatus {
    fn from(catalog: &Catalog) -> Self {
        CatalogStatus {
            built: true,
            listings: catalog.listings.len(),
            vacant: catalog.listings.iter().filter(|l| l.is_vacant).count(),
            built_at: Some(catalog.built_at),
            degraded: catalog.is_degraded(),
            failures: catalog
                .failures
                .iter()
                .map(|f| FailureView {
                    target: f.target.to_string(),
                    error: f.error.clone(),
                })
                .collect(),
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_type_spellings() {
        assert_eq!("details".parse::<QueryType>(), Ok(QueryType::PropertyDetails));
        assert_eq!("property_details".parse::<QueryType>(), Ok(QueryType::PropertyDetails));
        assert_eq!("availableListings".parse::<QueryType>(), Ok(QueryType::AvailableListings));
        assert_eq!("budget_filter".parse::<QueryType>(), Ok(QueryType::BudgetFilter));
        assert!("weather".parse::<QueryType>().is_err());
    }

    #[test]
    fn zero_and_blank_filters_are_absent() {
        let req = PropertyQueryRequest {
            query_type: "search".into(),
            min_rent: Some(0.0),
            max_rent: Some(1800.0),
            beds: Some(0),
            city: Some("  ".into()),
            ..Default::default()
        };

        assert_eq!(req.filter(), FilterSpec::rent_range(None, Some(1800.0)));
    }

    #[test]
    fn budget_filter_ignores_beds_and_city() {
        let req = PropertyQueryRequest {
            min_rent: Some(900.0),
            beds: Some(2),
            city: Some("Austin".into()),
            ..Default::default()
        };

        assert_eq!(req.budget_filter(), FilterSpec::rent_range(Some(900.0), None));
    }
}
