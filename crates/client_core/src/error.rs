use shared::{domain::VendorId, error::ValidationErrors};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("vendor failed validation: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("{operation} request failed: {source}")]
    Network {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{operation} request failed: {message}")]
    Unavailable {
        operation: &'static str,
        message: String,
    },
    #[error("vendor {0} has not been persisted yet")]
    NotPersisted(VendorId),
    #[error("email recipient is required")]
    MissingRecipient,
    #[error("invalid api base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl ClientError {
    pub fn network(operation: &'static str) -> impl FnOnce(reqwest::Error) -> Self {
        move |source| ClientError::Network { operation, source }
    }

    pub fn unavailable(operation: &'static str, message: impl Into<String>) -> Self {
        ClientError::Unavailable {
            operation,
            message: message.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }

    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            ClientError::Validation(errors) => Some(errors),
            _ => None,
        }
    }

    /// Transient text for the status line; the operation is abandoned, never retried.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Validation(_) => "Please correct the highlighted fields.".to_string(),
            ClientError::Network { operation, .. } | ClientError::Unavailable { operation, .. } => {
                format!("Failed to {operation}. Please try again.")
            }
            ClientError::NotPersisted(_) => {
                "This vendor has not been saved yet and cannot be changed.".to_string()
            }
            ClientError::MissingRecipient => "Please fill all required fields!".to_string(),
            ClientError::InvalidBaseUrl { url, .. } => {
                format!("The configured API address '{url}' is not a valid URL.")
            }
            ClientError::Io { context, .. } => format!("Failed to {context}."),
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
