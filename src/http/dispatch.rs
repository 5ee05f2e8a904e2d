use reqwest::Client as ReqwestClient;
use reqwest::header::{CONNECTION, HeaderValue};
use tracing::debug;

use super::error_helpers::check_response;
use super::loud_wire;
use crate::errors::NamecheapError;
use crate::request::{Method, RequestParams};
use crate::response::{ApiResponse, validate};

/// Sends one API call and validates the envelope.
///
/// GET puts `params` in the query string; POST sends them form-encoded.
/// Every request carries `Connection: close`, so the connection is dropped
/// once the body has been read.
///
/// # Errors
///
/// Returns an error if:
/// - The HTTP request fails or times out
/// - The response status is above 299
/// - The body is not a valid Namecheap envelope, or reports `Status="ERROR"`
pub async fn send(
    http_client: &ReqwestClient,
    url: &str,
    method: Method,
    params: &RequestParams,
) -> Result<ApiResponse, NamecheapError> {
    let request_id = loud_wire::next_request_id();
    loud_wire::log_request(request_id, method, url, params);
    debug!(
        "Sending {method} #{request_id} to {url}: {}",
        params.redacted_query()
    );

    let builder = match method {
        Method::Get => http_client.get(url).query(params.as_pairs()),
        Method::Post => http_client.post(url).form(params.as_pairs()),
    };

    let response = builder
        .header(CONNECTION, HeaderValue::from_static("close"))
        .send()
        .await?;

    loud_wire::log_response_status(request_id, response.status().as_u16());

    let response = check_response(response).await?;
    let body = response.text().await?;

    loud_wire::log_response_body(request_id, &body);

    let api_response = validate(&body)?;
    debug!(
        "Request #{request_id} succeeded: command={:?}, status={:?}",
        api_response.requested_command(),
        api_response.status()
    );

    Ok(api_response)
}
