mod client;
mod de;
mod gateway_error;
mod models;

pub use client::{Credentials, PropertyGateway, RentvineClient};
pub use gateway_error::GatewayError;
pub use models::{Fetched, PropertyRecord, UnitRecord};
