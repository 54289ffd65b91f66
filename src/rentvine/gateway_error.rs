use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Network error: {0}")]
    Transport(String),
    #[error("Rentvine HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Unexpected response shape: {0}")]
    Decode(String),
}
