use thiserror::Error;

use crate::response::ApiError;

/// Defines errors that can occur when talking to the Namecheap API.
///
/// Every fallible operation in this crate returns this single type, so callers
/// that only care about success or failure can treat it as one generic error.
/// Callers that want more detail can match on the variant.
///
/// # Example: Handling API Errors
///
/// ```ignore
/// match client.execute("namecheap.domains.getList", []).await {
///     Err(NamecheapError::Api { message, errors }) => {
///         tracing::error!("Namecheap rejected the call: {message} ({} errors)", errors.len());
///     }
///     Err(NamecheapError::Status { status_code, .. }) => {
///         tracing::error!("Namecheap returned HTTP {status_code}");
///     }
///     // ...
/// }
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum NamecheapError {
    /// Transport failure: DNS, connect, TLS, timeout, or body read.
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
    /// The server answered with an HTTP status above 299.
    ///
    /// `response` carries the string form of the response, `<Response [CODE]>`,
    /// followed by a preview of the body.
    #[error("{response}")]
    Status {
        /// HTTP status code (e.g., 404, 500)
        status_code: u16,
        /// String form of the response
        response: String,
    },
    /// The envelope parsed, but `ApiResponse` carried `Status="ERROR"`.
    ///
    /// The display form is exactly the concatenated text of every `Error`
    /// element, in document order.
    #[error("{message}")]
    Api {
        /// Concatenated error text
        message: String,
        /// Individual errors, including their `Number` attribute when present
        errors: Vec<ApiError>,
    },
    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),
    /// The body was valid XML but not a Namecheap envelope.
    #[error("Malformed API response: {0}")]
    MalformedResponse(String),
    #[error("Configuration error: {0}")]
    Config(String),
    /// Failed to build the HTTP client.
    ///
    /// This typically only occurs in exceptional circumstances such as
    /// TLS backend initialization failures.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

impl NamecheapError {
    /// Returns `true` if this error is likely transient and the request may succeed on retry.
    ///
    /// - **HTTP errors**: network issues, connection resets, timeouts
    /// - **Rate limits (429)** and **server errors (5xx)**
    ///
    /// API-level errors (`Status="ERROR"`) are never retryable: Namecheap
    /// reports bad credentials, unknown commands and whitelisting problems
    /// that way, and resending the same parameters will fail the same way.
    ///
    /// The client never retries on its own; this is for callers that do.
    ///
    /// ```rust
    /// use namecheap_rs::NamecheapError;
    ///
    /// let busy = NamecheapError::Status {
    ///     status_code: 503,
    ///     response: "<Response [503]>".to_string(),
    /// };
    /// assert!(busy.is_retryable());
    ///
    /// let rejected = NamecheapError::Api {
    ///     message: "API Key is invalid or API access has not been enabled".to_string(),
    ///     errors: Vec::new(),
    /// };
    /// assert!(!rejected.is_retryable());
    /// ```
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            NamecheapError::Http(_) => true,
            NamecheapError::Status { status_code, .. } => {
                *status_code == 429 || *status_code >= 500
            }
            NamecheapError::Api { .. }
            | NamecheapError::Xml(_)
            | NamecheapError::MalformedResponse(_)
            | NamecheapError::Config(_)
            | NamecheapError::ClientBuild(_) => false,
        }
    }

    /// Returns the HTTP status code if this error came from a non-success response.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            NamecheapError::Status { status_code, .. } => Some(*status_code),
            NamecheapError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
