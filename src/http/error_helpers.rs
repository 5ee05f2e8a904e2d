//! Error handling utilities for HTTP responses and error context formatting.

use reqwest::Response;
use tracing::error;

use crate::errors::NamecheapError;

/// Maximum characters to include from error body in context messages
const ERROR_BODY_PREVIEW_LENGTH: usize = 200;

/// Highest status code treated as success.
const MAX_SUCCESS_STATUS: u16 = 299;

/// Checks the HTTP status, returning the response if it is at most 299.
///
/// Anything above 299 is logged and turned into [`NamecheapError::Status`].
/// Timeouts and connection failures never reach this point; they surface
/// from `send()` as [`NamecheapError::Http`].
///
/// # Errors
///
/// Returns an error carrying the response's string form on non-success status.
pub async fn check_response(response: Response) -> Result<Response, NamecheapError> {
    if response.status().as_u16() <= MAX_SUCCESS_STATUS {
        Ok(response)
    } else {
        Err(read_error_with_context(response).await)
    }
}

/// Reads the error body and builds a [`NamecheapError::Status`].
///
/// The message starts with `<Response [CODE]>` followed by the canonical
/// reason phrase and the first 200 characters of the body, if any.
pub async fn read_error_with_context(response: Response) -> NamecheapError {
    let status = response.status();
    let status_code = status.as_u16();

    let error_body = response
        .text()
        .await
        .unwrap_or_else(|e| format!("Failed to read error body: {}", e));

    let response = format_response_string(
        status_code,
        status.canonical_reason(),
        &truncate_for_context(error_body.trim(), ERROR_BODY_PREVIEW_LENGTH),
    );

    error!("{response}");

    NamecheapError::Status {
        status_code,
        response,
    }
}

/// String form of a response: `<Response [503]> Service Unavailable: body...`.
pub fn format_response_string(status_code: u16, reason: Option<&str>, body: &str) -> String {
    let mut out = format!("<Response [{status_code}]>");
    if let Some(reason) = reason {
        out.push(' ');
        out.push_str(reason);
    }
    if !body.is_empty() {
        out.push_str(": ");
        out.push_str(body);
    }
    out
}

/// Truncates a string to specified length, adding "..." if truncated.
///
/// Uses character-boundary-aware slicing to prevent panics on multi-byte UTF-8 characters.
pub fn truncate_for_context(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let truncate_at = s
            .char_indices()
            .take_while(|(i, c)| i + c.len_utf8() <= max_len)
            .last()
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        format!("{}...", &s[..truncate_at])
    }
}
