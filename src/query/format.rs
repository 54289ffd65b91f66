// src/query/format.rs

use crate::catalog::Listing;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyType {
    SingleFamilyHome,
    Duplex,
    CondoApartment,
    Townhouse,
    MultiFamily,
    Unknown,
}

impl PropertyType {
    /// Rentvine `propertyTypeID` codes.
    pub fn from_code(code: Option<&str>) -> Self {
        match code.map(str::trim) {
            Some("1") => PropertyType::SingleFamilyHome,
            Some("2") => PropertyType::Duplex,
            Some("3") => PropertyType::CondoApartment,
            Some("4") => PropertyType::Townhouse,
            Some("5") => PropertyType::MultiFamily,
            _ => PropertyType::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PropertyType::SingleFamilyHome => "Single Family Home",
            PropertyType::Duplex => "Duplex",
            PropertyType::CondoApartment => "Condo/Apartment",
            PropertyType::Townhouse => "Townhouse",
            PropertyType::MultiFamily => "Multi-Family",
            PropertyType::Unknown => "Unknown",
        }
    }
}

/// The shape every listing takes once it leaves the query engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingView {
    pub property_id: i64,
    pub unit_id: i64,
    pub address: String,
    pub full_address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub rent: f64,
    pub deposit: f64,
    pub beds: i64,
    pub full_baths: i64,
    pub half_baths: i64,
    pub size: Option<i64>,
    pub year_built: Option<i64>,
    pub is_available: bool,
    pub property_type: &'static str,
}

impl From<&Listing> for ListingView {
    fn from(listing: &Listing) -> Self {
        let unit = &listing.unit;
        ListingView {
            property_id: unit.property_id,
            unit_id: unit.unit_id,
            address: listing.display_address.clone(),
            full_address: listing.full_address.clone(),
            city: unit.city.clone(),
            state: unit.state.clone(),
            zip_code: unit.postal_code.clone(),
            rent: unit.rent,
            deposit: unit.deposit,
            beds: unit.beds,
            full_baths: unit.full_baths,
            half_baths: unit.half_baths,
            size: unit.size,
            year_built: listing.property.year_built,
            is_available: listing.is_vacant,
            property_type: PropertyType::from_code(listing.property.property_type_id.as_deref())
                .label(),
        }
    }
}
