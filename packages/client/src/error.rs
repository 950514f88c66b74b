use thiserror::Error;

/// Client operation errors
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("No {collection} with id {id}")]
    NotFound { collection: &'static str, id: String },
}

pub type ClientResult<T> = Result<T, ClientError>;
