use reqwest::StatusCode;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// The one failure shape handed to callers. Every way a request can go wrong
/// collapses into a variant here, and `Display` is the message callers show
/// verbatim.
#[derive(Debug, Error)]
pub enum ApiError {
    /// An endpoint required a bearer token and the store holds none.
    #[error("no access token found, please log in first")]
    NotAuthenticated,

    /// The server answered with a non-200 status.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    /// The request went out but nothing came back.
    #[error("no response received from server")]
    NoResponse,

    /// Anything else raised while building or sending the request, or while
    /// decoding a successful body.
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl ApiError {
    /// Message precedence for a rejection: the response body when the server
    /// sent one, the status's canonical reason otherwise, the bare status as
    /// a last resort.
    pub(crate) fn rejected(status: StatusCode, body: String) -> Self {
        let message = if body.trim().is_empty() {
            status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| status.to_string())
        } else {
            body
        };

        Self::Rejected { status, message }
    }

    pub(crate) fn transport(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            Self::NoResponse
        } else {
            Self::Unexpected(err.into())
        }
    }

    /// The HTTP status behind a rejection, for callers that want to
    /// distinguish rejections without parsing message text.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}
