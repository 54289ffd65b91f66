use crate::catalog::Listing;

/// Optional, independent predicates. Every one that is set must hold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    pub min_rent: Option<f64>,
    pub max_rent: Option<f64>,
    /// At least this many bedrooms (not an exact match).
    pub min_beds: Option<i64>,
    /// Case-insensitive substring of the unit's city.
    pub city: Option<String>,
}

impl FilterSpec {
    pub fn rent_range(min_rent: Option<f64>, max_rent: Option<f64>) -> Self {
        Self {
            min_rent,
            max_rent,
            ..Default::default()
        }
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        let unit = &listing.unit;

        if self.min_rent.is_some_and(|min| unit.rent < min) {
            return false;
        }
        if self.max_rent.is_some_and(|max| unit.rent > max) {
            return false;
        }
        if self.min_beds.is_some_and(|beds| unit.beds < beds) {
            return false;
        }
        if let Some(city) = &self.city {
            if !unit.city.to_lowercase().contains(&city.to_lowercase()) {
                return false;
            }
        }
        true
    }
}

/// Keep the listings that satisfy `filter`, in their original order.
pub fn apply_filters<'a, I>(listings: I, filter: &FilterSpec) -> Vec<&'a Listing>
where
    I: IntoIterator<Item = &'a Listing>,
{
    listings.into_iter().filter(|l| filter.matches(l)).collect()
}
