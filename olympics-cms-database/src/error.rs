use thiserror::Error;

use crate::id::InvalidDocumentId;

#[allow(clippy::module_name_repetitions)]
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to build the store client {0}")]
    ClientBuild(#[source] reqwest::Error),
    #[error("request to the document store failed {0}")]
    Transport(#[from] reqwest::Error),
    #[error("document store answered {status}: {message}")]
    Status { status: u16, message: String },
    #[error("document {0} not found")]
    NotFound(String),
    #[error("document could not be decoded {0}")]
    Decode(#[from] serde_json::Error),
    #[error("document is not a json object")]
    NotAnObject,
    #[error("{0}")]
    InvalidId(#[from] InvalidDocumentId),
    #[error("credential is not a valid header value")]
    InvalidHeader,
    #[error("session secret missing, is an api key configured?")]
    MissingSessionSecret,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("document store unavailable")]
    Unavailable,
}

impl StoreError {
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_) | Self::Status { status: 404, .. }
        )
    }
}
