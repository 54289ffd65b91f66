// src/catalog/listing.rs

use crate::rentvine::{PropertyRecord, UnitRecord};

/// One rentable unit joined with its parent property.
///
/// Derived fields are computed once in [`Listing::unify`] and never change;
/// a listing lives exactly as long as the catalog that owns it.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub property: PropertyRecord,
    pub unit: UnitRecord,

    /// `"{address}, {city}, {state} {postal}"`
    pub full_address: String,
    /// Street address plus the secondary designator, if any.
    pub display_address: String,
    pub is_vacant: bool,
}

impl Listing {
    pub fn unify(property: &PropertyRecord, unit: UnitRecord) -> Self {
        let full_address = format!(
            "{}, {}, {} {}",
            unit.address, unit.city, unit.state, unit.postal_code
        );

        let display_address = match unit.address2.as_deref() {
            Some(extra) if !extra.is_empty() => format!("{} {}", unit.address, extra),
            _ => unit.address.clone(),
        };

        let is_vacant = unit.lease_id.as_deref().map_or(true, str::is_empty);

        Listing {
            property: property.clone(),
            unit,
            full_address,
            display_address,
            is_vacant,
        }
    }
}
