//! Wire-level debugging via the `NAMECHEAP_LOUD_WIRE` environment variable.
//!
//! When `NAMECHEAP_LOUD_WIRE` is set to any value, prints every API request
//! and response to stderr with colors.
//!
//! # Usage
//!
//! ```bash
//! NAMECHEAP_LOUD_WIRE=1 cargo run --example list_domains
//! ```
//!
//! # Output Format
//!
//! - Green `>>>` for outgoing requests
//! - Red `<<<` for incoming responses
//! - Timestamps and request IDs for correlation
//!
//! `ApiKey` is always masked.

use std::sync::OnceLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use colored::Colorize;

use crate::request::{Method, RequestParams};

/// Name of the environment variable that turns wire logging on.
pub const ENV_VAR: &str = "NAMECHEAP_LOUD_WIRE";

/// Request ID counter for correlating requests with responses
static REQUEST_COUNTER: AtomicUsize = AtomicUsize::new(1);

/// Cached check for whether wire logging is enabled
static ENABLED: OnceLock<bool> = OnceLock::new();

/// Maximum body length printed before truncation.
const BODY_PREVIEW_LENGTH: usize = 2000;

/// Check if wire logging is enabled.
///
/// The result is cached after first check. `NAMECHEAP_LOUD_WIRE` must be set
/// before the first API call is made.
#[must_use]
pub fn is_enabled() -> bool {
    *ENABLED.get_or_init(|| std::env::var(ENV_VAR).is_ok())
}

/// Get the next request ID for correlation.
#[must_use]
pub fn next_request_id() -> usize {
    REQUEST_COUNTER.fetch_add(1, Ordering::Relaxed)
}

fn timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Log prefix with timestamp and request ID.
fn prefix(request_id: usize) -> String {
    let ts = timestamp().dimmed();
    format!(
        "{} {} {}",
        "[LOUD_WIRE]".bold(),
        ts,
        format!("[REQ#{}]", request_id).cyan()
    )
}

/// Log an outgoing HTTP request.
pub fn log_request(request_id: usize, method: Method, url: &str, params: &RequestParams) {
    if !is_enabled() {
        return;
    }

    let prefix = prefix(request_id);
    let direction = ">>>".green().bold();

    let mut lines = request_lines(method, url, params).into_iter();
    if let Some(first) = lines.next() {
        eprintln!("{prefix} {direction} {first}");
    }
    for line in lines {
        eprintln!("{prefix}   {}", line.green());
    }
}

/// Plain-text lines for a request: `METHOD url`, then one `key=value` per parameter.
fn request_lines(method: Method, url: &str, params: &RequestParams) -> Vec<String> {
    std::iter::once(format!("{method} {url}"))
        .chain(params.redacted_iter().map(|(k, v)| format!("{k}={v}")))
        .collect()
}

/// Log an incoming HTTP response status.
pub fn log_response_status(request_id: usize, status: u16) {
    if !is_enabled() {
        return;
    }

    let prefix = prefix(request_id);
    let direction = "<<<".red().bold();
    let status_text = if status < 300 {
        format!("{status} OK").green()
    } else {
        format!("{status} ERROR").red()
    };

    eprintln!("{prefix} {direction} {status_text}");
}

/// Log an incoming HTTP response body.
pub fn log_response_body(request_id: usize, body: &str) {
    if !is_enabled() {
        return;
    }

    let prefix = prefix(request_id);
    let body = super::error_helpers::truncate_for_context(body, BODY_PREVIEW_LENGTH);

    eprintln!("{prefix} {}:", "Response".red());
    for line in body.lines().filter(|l| !l.trim().is_empty()) {
        eprintln!("{prefix} {line}");
    }
}
