use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected HTTP status: {0}")]
    Status(u16),

    #[error("GraphQL error: {0}")]
    GraphQl(String),

    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error("Response missing data for {0}")]
    MissingData(String),

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Malformed response: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ApiError>;
