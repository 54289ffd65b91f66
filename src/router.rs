use crate::api::{self, CatalogStatus, PropertyQueryRequest};
use crate::errors::ServerError;
use crate::query::PropertyService;
use crate::responses::{json_response, ResultResp};
use astra::Request;
use serde_json::json;
use std::io::Read;

pub struct AppState {
    pub service: PropertyService,
}

pub fn handle(mut req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str().to_owned();
    let path = req.uri().path().to_owned();

    tracing::debug!(%method, %path, "Request");

    match (method.as_str(), path.as_str()) {
        ("GET", "/health") => json_response(200, &json!({ "status": "healthy" })),

        ("POST", "/api/property-query") => {
            let request: PropertyQueryRequest = read_json(&mut req)?;
            let response = api::answer(&state.service, &request);
            json_response(200, &response)
        }

        ("GET", "/api/catalog") => {
            let status = state
                .service
                .cache()
                .peek()
                .map(|catalog| CatalogStatus::from(catalog.as_ref()))
                .unwrap_or_default();
            json_response(200, &status)
        }

        ("POST", "/api/catalog/refresh") => match state.service.cache().refresh() {
            Ok(catalog) => json_response(200, &CatalogStatus::from(catalog.as_ref())),
            Err(e) => {
                tracing::error!(error = %e, "Catalog refresh failed");
                let status = CatalogStatus {
                    error: Some(e.to_string()),
                    ..Default::default()
                };
                json_response(503, &status)
            }
        },

        (_, "/health" | "/api/property-query" | "/api/catalog" | "/api/catalog/refresh") => {
            Err(ServerError::MethodNotAllowed)
        }
        _ => Err(ServerError::NotFound),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(req: &mut Request) -> Result<T, ServerError> {
    let mut body = Vec::new();
    req.body_mut()
        .reader()
        .read_to_end(&mut body)
        .map_err(|e| ServerError::BadRequest(format!("Could not read body: {e}")))?;

    serde_json::from_slice(&body).map_err(|e| ServerError::BadRequest(format!("Invalid JSON: {e}")))
}
