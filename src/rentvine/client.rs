// client.rs
use crate::rentvine::models::{unwrap_envelopes, Fetched, PropertyRecord, UnitRecord};
use crate::rentvine::GatewayError;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Longest slice of an error body kept in a `GatewayError::Status`.
const ERROR_BODY_LIMIT: usize = 200;

/// Read-only access to the property-management backend.
///
/// Implementations make exactly one attempt per call. An `Err` means the
/// whole response was unusable; elements that fail to decode on their own
/// come back in `Fetched::rejected`. Whether either is fatal is decided by
/// the catalog builder, not here.
pub trait PropertyGateway: Send + Sync {
    fn fetch_properties(&self) -> Result<Fetched<PropertyRecord>, GatewayError>;
    fn fetch_units(&self, property_id: i64) -> Result<Fetched<UnitRecord>, GatewayError>;
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
}

pub struct RentvineClient {
    client: Client,
    base_url: Url,
    credentials: Credentials,
}

impl RentvineClient {
    /// `https://{subdomain}.rentvine.com/api/manager/`
    pub fn tenant_base_url(subdomain: &str) -> Result<Url, GatewayError> {
        Url::parse(&format!("https://{subdomain}.rentvine.com/api/manager/"))
            .map_err(|e| GatewayError::Transport(format!("invalid tenant subdomain {subdomain:?}: {e}")))
    }

    pub fn new(
        base_url: Url,
        credentials: Credentials,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        // Url::join drops the last segment unless the base ends with '/'.
        let base_url = if base_url.path().ends_with('/') {
            base_url
        } else {
            let mut with_slash = base_url;
            let path = format!("{}/", with_slash.path());
            with_slash.set_path(&path);
            with_slash
        };

        Ok(Self {
            client,
            base_url,
            credentials,
        })
    }

    #[cfg(test)]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// GET `path` and parse the body as a JSON array.
    fn get_array(&self, path: &str) -> Result<Vec<Value>, GatewayError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| GatewayError::Transport(format!("bad path {path}: {e}")))?;

        tracing::debug!(%url, "Rentvine request");

        let resp = self
            .client
            .get(url)
            .basic_auth(&self.credentials.api_key, Some(&self.credentials.api_secret))
            .header(CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
            .header(ACCEPT, mime::APPLICATION_JSON.as_ref())
            .send()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        if !status.is_success() {
            let body: String = text.chars().take(ERROR_BODY_LIMIT).collect();
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&text).map_err(|e| GatewayError::Decode(format!("{path}: {e}")))
    }
}

impl PropertyGateway for RentvineClient {
    fn fetch_properties(&self) -> Result<Fetched<PropertyRecord>, GatewayError> {
        let items = self.get_array("properties")?;
        Ok(unwrap_envelopes(items, "property"))
    }

    fn fetch_units(&self, property_id: i64) -> Result<Fetched<UnitRecord>, GatewayError> {
        let items = self.get_array(&format!("properties/{property_id}/units"))?;
        Ok(unwrap_envelopes(items, "unit"))
    }
}
