use splunk_values::ValuesError;
use thiserror::Error;

/// Errors raised by [`Client`](crate::Client) operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// An entry could not be encoded or projected.
    #[error(transparent)]
    Values(#[from] ValuesError),

    /// The HTTP request itself failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A response body was not the expected JSON.
    #[error("Could not decode response: {0}")]
    Json(#[from] serde_json::Error),

    /// The configured base URL is not a valid URL.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Exactly one of a namespace's user and app is set.
    #[error("Invalid namespace: user '{user}' and app '{app}' must both be set or both be empty")]
    InvalidNamespace {
        /// The namespace's user.
        user: String,
        /// The namespace's app.
        app: String,
    },

    /// Login was rejected, or the server refused the session.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The addressed entry does not exist.
    #[error("Entry not found: {path}")]
    NotFound {
        /// The request path.
        path: String,
    },

    /// The server answered with an error status.
    #[error("HTTP {code}: {}", .messages.join("; "))]
    Status {
        /// The HTTP status code.
        code: u16,
        /// The texts of the response's `messages` array.
        messages: Vec<String>,
    },

    /// The server answered successfully but not in the expected shape.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}
