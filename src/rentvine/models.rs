use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use super::de;

// GET /properties
//  └── [ { property } ]
//       ├── propertyID
//       ├── propertyTypeID
//       ├── name
//       └── yearBuilt
//
// GET /properties/{id}/units
//  └── [ { unit } ]
//       ├── unitID, propertyID
//       ├── address, address2, city, stateID, postalCode
//       ├── rent, deposit
//       ├── beds, fullBaths, halfBaths, size
//       └── leaseID

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PropertyRecord {
    #[serde(rename = "propertyID", deserialize_with = "de::integer")]
    pub property_id: i64,
    #[serde(rename = "propertyTypeID", default, deserialize_with = "de::opt_text")]
    pub property_type_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "yearBuilt", default, deserialize_with = "de::opt_integer")]
    pub year_built: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UnitRecord {
    #[serde(rename = "unitID", deserialize_with = "de::integer")]
    pub unit_id: i64,
    #[serde(rename = "propertyID", deserialize_with = "de::integer")]
    pub property_id: i64,

    #[serde(default, deserialize_with = "de::text")]
    pub address: String,
    #[serde(default)]
    pub address2: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub city: String,
    #[serde(rename = "stateID", default, deserialize_with = "de::text")]
    pub state: String,
    #[serde(rename = "postalCode", default, deserialize_with = "de::text")]
    pub postal_code: String,

    #[serde(deserialize_with = "de::decimal")]
    pub rent: f64,
    #[serde(default, deserialize_with = "de::decimal_or_zero")]
    pub deposit: f64,

    #[serde(deserialize_with = "de::integer")]
    pub beds: i64,
    #[serde(rename = "fullBaths", deserialize_with = "de::integer")]
    pub full_baths: i64,
    #[serde(rename = "halfBaths", deserialize_with = "de::integer")]
    pub half_baths: i64,
    #[serde(default, deserialize_with = "de::opt_integer")]
    pub size: Option<i64>,

    /// Present and non-empty when the unit is under lease.
    #[serde(rename = "leaseID", default, deserialize_with = "de::opt_text")]
    pub lease_id: Option<String>,
}

/// Records from one response, plus a note for every element that could not
/// be turned into a record. A bad element never costs the others.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<T> {
    pub records: Vec<T>,
    pub rejected: Vec<String>,
}

impl<T> From<Vec<T>> for Fetched<T> {
    fn from(records: Vec<T>) -> Self {
        Fetched {
            records,
            rejected: Vec::new(),
        }
    }
}

/// Unwrap `[{"<key>": {...}}, ...]` one element at a time.
pub(crate) fn unwrap_envelopes<T: DeserializeOwned>(items: Vec<Value>, key: &str) -> Fetched<T> {
    let mut fetched = Fetched::from(Vec::new());

    for (index, item) in items.into_iter().enumerate() {
        let inner = match item {
            Value::Object(mut map) => map.remove(key),
            _ => None,
        };
        let Some(inner) = inner else {
            fetched.rejected.push(format!("element {index}: no \"{key}\" object"));
            continue;
        };

        match serde_json::from_value(inner) {
            Ok(record) => fetched.records.push(record),
            Err(e) => fetched.rejected.push(format!("element {index}: {e}")),
        }
    }

    fetched
}
