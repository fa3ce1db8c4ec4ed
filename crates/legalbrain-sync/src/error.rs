use legalbrain_core::error::CoreError;
use legalbrain_core::models::rule::RuleId;
use thiserror::Error;

/// Message shown when a failed submission carries no readable body.
pub const GENERIC_SUBMISSION_FAILURE: &str = "Upload failed";

/// A failed call to a remote collaborator. The message is already fit for
/// display; `status` is the HTTP status when there was a response at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RemoteError {
    pub status: Option<u16>,
    pub message: String,
}

impl RemoteError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status == Some(404)
    }
}

/// Load failed. Nothing from the attempt was installed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("{0}")]
    Rules(RemoteError),

    #[error("{0}")]
    Catalog(RemoteError),
}

/// Create, delete or toggle failed. The local rule list is untouched.
#[derive(Debug, Error)]
pub enum MutationError {
    #[error("{0}")]
    Invalid(#[from] CoreError),

    #[error("{0}")]
    Create(RemoteError),

    #[error("{source}")]
    Delete { id: RuleId, source: RemoteError },

    #[error("{source}")]
    Toggle { id: RuleId, source: RemoteError },
}

impl MutationError {
    /// The rule the failed mutation targeted, if it had one.
    pub fn rule_id(&self) -> Option<&RuleId> {
        match self {
            MutationError::Delete { id, .. } | MutationError::Toggle { id, .. } => Some(id),
            MutationError::Invalid(_) | MutationError::Create(_) => None,
        }
    }
}

/// The analysis call failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SubmissionError {
    pub status: Option<u16>,
    pub message: String,
}

impl From<RemoteError> for SubmissionError {
    fn from(err: RemoteError) -> Self {
        let message = if err.message.trim().is_empty() {
            GENERIC_SUBMISSION_FAILURE.to_string()
        } else {
            err.message
        };
        Self {
            status: err.status,
            message,
        }
    }
}
