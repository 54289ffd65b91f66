pub mod address;
mod engine;
mod filter;
mod format;

pub use engine::{PropertyQuery, PropertyService, QueryOutcome};
pub use filter::FilterSpec;
pub use format::ListingView;
