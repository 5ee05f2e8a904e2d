//! # namecheap-rs
//!
//! Request/response plumbing for the Namecheap registrar XML API.
//!
//! Every Namecheap command shares the same shape: five authentication
//! parameters plus a `Command` name go out as a GET query or POST form, and an
//! `ApiResponse` XML envelope comes back. This crate handles that shared part
//! so individual operations (domains, DNS, SSL, users) only add their own
//! fields and read their own `CommandResponse` payload.
//!
//! ## Quick start
//!
//! ```no_run
//! use namecheap_rs::{Client, NamecheapConfig};
//!
//! # async fn example() -> Result<(), namecheap_rs::NamecheapError> {
//! // Reads NAMECHEAP_URL, NAMECHEAP_NAME, NAMECHEAP_USER, NAMECHEAP_KEY, NAMECHEAP_CLIENT_IP
//! let client = Client::new(NamecheapConfig::from_env())?;
//!
//! let mut params = client.params("namecheap.domains.getList");
//! params.insert("PageSize", "20");
//!
//! let response = client.get_request(&params).await?;
//! if let Some(payload) = response.command_response() {
//!     for domain in payload.elements_by_tag_name("Domain") {
//!         println!("{:?}", domain.attribute("Name"));
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Errors
//!
//! All operations return [`NamecheapError`]. HTTP statuses above 299 become
//! [`NamecheapError::Status`]; envelopes with `Status="ERROR"` become
//! [`NamecheapError::Api`], whose message is the text of every `Error`
//! element joined in document order.
//!
//! ## Wire debugging
//!
//! Set `NAMECHEAP_LOUD_WIRE=1` to print raw requests and responses to stderr.
//! The API key is always masked.

mod client;
pub mod config;
mod errors;
mod http;
mod request;
pub mod response;

pub use client::{Client, ClientBuilder, DEFAULT_TIMEOUT};
pub use config::{
    ConfigSource, EnvSource, Layered, NamecheapConfig, PRODUCTION_URL, SANDBOX_URL, TomlSource,
};
pub use errors::NamecheapError;
pub use request::{Method, RequestParams};
pub use response::{ApiError, ApiResponse, XmlDocument, XmlElement, XmlNode, validate};
