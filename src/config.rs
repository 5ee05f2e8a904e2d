//! Configuration lookup for Namecheap credentials and endpoint.
//!
//! Values are looked up by dotted key (`namecheap.url`, `namecheap.client_ip`)
//! through the [`ConfigSource`] trait. Sources can be a flat map, environment
//! variables, a TOML document, or a [`Layered`] stack of those.
//!
//! Missing keys resolve to the empty string. The resolved
//! [`NamecheapConfig`] is never validated here; a bad URL or credential
//! surfaces when the first request is made.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use tracing::debug;

use crate::errors::NamecheapError;
use crate::request::RequestParams;

/// Production API endpoint.
pub const PRODUCTION_URL: &str = "https://api.namecheap.com/xml.response";

/// Sandbox API endpoint.
pub const SANDBOX_URL: &str = "https://api.sandbox.namecheap.com/xml.response";

pub const URL_KEY: &str = "namecheap.url";
pub const NAME_KEY: &str = "namecheap.name";
pub const USER_KEY: &str = "namecheap.user";
pub const KEY_KEY: &str = "namecheap.key";
pub const CLIENT_IP_KEY: &str = "namecheap.client_ip";

/// Something that can answer a dotted configuration key.
pub trait ConfigSource {
    /// Returns the value for `key`, or `None` if this source does not define it.
    fn option(&self, key: &str) -> Option<String>;
}

impl ConfigSource for HashMap<String, String> {
    fn option(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<T: ConfigSource + ?Sized> ConfigSource for &T {
    fn option(&self, key: &str) -> Option<String> {
        (**self).option(key)
    }
}

impl<T: ConfigSource + ?Sized> ConfigSource for Box<T> {
    fn option(&self, key: &str) -> Option<String> {
        (**self).option(key)
    }
}

/// Reads configuration from environment variables.
///
/// `namecheap.client_ip` maps to `NAMECHEAP_CLIENT_IP`. With a prefix of
/// `"MYAPP"` it maps to `MYAPP_NAMECHEAP_CLIENT_IP`.
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
    prefix: Option<String>,
}

impl EnvSource {
    #[must_use]
    pub fn new() -> Self {
        Self { prefix: None }
    }

    #[must_use]
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }

    /// The environment variable name consulted for `key`.
    #[must_use]
    pub fn var_name(&self, key: &str) -> String {
        let base = key.replace('.', "_").to_uppercase();
        match &self.prefix {
            Some(prefix) => format!("{}_{base}", prefix.to_uppercase()),
            None => base,
        }
    }
}

impl ConfigSource for EnvSource {
    fn option(&self, key: &str) -> Option<String> {
        std::env::var(self.var_name(key)).ok()
    }
}

/// A parsed TOML document. Dotted keys walk nested tables.
///
/// ```toml
/// [namecheap]
/// url = "https://api.sandbox.namecheap.com/xml.response"
/// name = "apiuser"
/// user = "apiuser"
/// key = "0123456789abcdef"
/// client_ip = "203.0.113.10"
/// ```
#[derive(Debug, Clone)]
pub struct TomlSource {
    table: toml::Table,
}

impl TomlSource {
    /// Parses a TOML document from a string.
    ///
    /// # Errors
    ///
    /// Returns [`NamecheapError::Config`] if the text is not valid TOML.
    pub fn parse(raw: &str) -> Result<Self, NamecheapError> {
        let table: toml::Table = raw
            .parse()
            .map_err(|e: toml::de::Error| NamecheapError::Config(e.to_string()))?;
        Ok(Self { table })
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`NamecheapError::Config`] if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, NamecheapError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            NamecheapError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        debug!("Loaded configuration file {}", path.display());
        Self::parse(&raw)
    }
}

impl ConfigSource for TomlSource {
    fn option(&self, key: &str) -> Option<String> {
        let mut parts = key.split('.');
        let mut value = self.table.get(parts.next()?)?;
        for part in parts {
            value = value.as_table()?.get(part)?;
        }
        match value {
            toml::Value::String(s) => Some(s.clone()),
            toml::Value::Integer(i) => Some(i.to_string()),
            toml::Value::Float(f) => Some(f.to_string()),
            toml::Value::Boolean(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

/// Sources consulted in order; the first one that defines a key wins.
#[derive(Default)]
pub struct Layered {
    sources: Vec<Box<dyn ConfigSource + Send + Sync>>,
}

impl Layered {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a source below the ones already present.
    #[must_use]
    pub fn with(mut self, source: impl ConfigSource + Send + Sync + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }
}

impl fmt::Debug for Layered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Layered")
            .field("sources", &self.sources.len())
            .finish()
    }
}

impl ConfigSource for Layered {
    fn option(&self, key: &str) -> Option<String> {
        self.sources.iter().find_map(|source| source.option(key))
    }
}

/// Resolved Namecheap endpoint and credentials.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct NamecheapConfig {
    /// API endpoint (`namecheap.url`).
    pub url: String,
    /// Sent as `ApiUser` (`namecheap.name`).
    pub api_user: String,
    /// Sent as `UserName` (`namecheap.user`).
    pub user_name: String,
    /// Sent as `ApiKey` (`namecheap.key`).
    pub api_key: String,
    /// Sent as `ClientIp` (`namecheap.client_ip`). Must be whitelisted on the account.
    pub client_ip: String,
}

impl NamecheapConfig {
    /// Resolves every Namecheap key from `source`. Missing keys become `""`.
    #[must_use]
    pub fn from_source(source: &dyn ConfigSource) -> Self {
        let lookup = |key: &str| {
            source.option(key).unwrap_or_else(|| {
                debug!("Configuration key {key} not set, using empty value");
                String::new()
            })
        };

        Self {
            url: lookup(URL_KEY),
            api_user: lookup(NAME_KEY),
            user_name: lookup(USER_KEY),
            api_key: lookup(KEY_KEY),
            client_ip: lookup(CLIENT_IP_KEY),
        }
    }

    /// Loads `.env` if present, then resolves from `NAMECHEAP_*` variables.
    #[must_use]
    pub fn from_env() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            debug!("Loaded environment from {}", path.display());
        }
        Self::from_source(&EnvSource::new())
    }

    /// Environment variables layered over a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`NamecheapError::Config`] if the file cannot be read or parsed.
    pub fn from_file_with_env(path: impl AsRef<Path>) -> Result<Self, NamecheapError> {
        let layered = Layered::new()
            .with(EnvSource::new())
            .with(TomlSource::from_file(path)?);
        Ok(Self::from_source(&layered))
    }

    /// Builds the authentication parameters plus `Command` for one API call.
    #[must_use]
    pub fn request_params(&self, command: &str) -> RequestParams {
        RequestParams::new()
            .with("ApiUser", &self.api_user)
            .with("UserName", &self.user_name)
            .with("ApiKey", &self.api_key)
            .with("ClientIp", &self.client_ip)
            .with("Command", command)
    }
}

impl fmt::Debug for NamecheapConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamecheapConfig")
            .field("url", &self.url)
            .field("api_user", &self.api_user)
            .field("user_name", &self.user_name)
            .field("api_key", &"<redacted>")
            .field("client_ip", &self.client_ip)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_map() -> HashMap<String, String> {
        [
            (URL_KEY, SANDBOX_URL),
            (NAME_KEY, "apiuser"),
            (USER_KEY, "username"),
            (KEY_KEY, "secret-key"),
            (CLIENT_IP_KEY, "203.0.113.10"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn test_from_source_reads_all_keys() {
        let config = NamecheapConfig::from_source(&full_map());
        assert_eq!(config.url, SANDBOX_URL);
        assert_eq!(config.api_user, "apiuser");
        assert_eq!(config.user_name, "username");
        assert_eq!(config.api_key, "secret-key");
        assert_eq!(config.client_ip, "203.0.113.10");
    }

    #[test]
    fn test_missing_keys_resolve_to_empty() {
        let config = NamecheapConfig::from_source(&HashMap::new());
        assert_eq!(config, NamecheapConfig::default());
    }

    #[test]
    fn test_request_params_order_and_values() {
        let config = NamecheapConfig::from_source(&full_map());
        let params = config.request_params("namecheap.domains.getList");

        let keys: Vec<&str> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec!["ApiUser", "UserName", "ApiKey", "ClientIp", "Command"]
        );
        assert_eq!(params.get("ApiUser"), Some("apiuser"));
        assert_eq!(params.get("UserName"), Some("username"));
        assert_eq!(params.get("ApiKey"), Some("secret-key"));
        assert_eq!(params.get("ClientIp"), Some("203.0.113.10"));
        assert_eq!(params.get("Command"), Some("namecheap.domains.getList"));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = NamecheapConfig::from_source(&full_map());
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("<redacted>"));
        assert!(debug.contains("apiuser"));
    }

    #[test]
    fn test_env_var_name() {
        assert_eq!(
            EnvSource::new().var_name(CLIENT_IP_KEY),
            "NAMECHEAP_CLIENT_IP"
        );
        assert_eq!(
            EnvSource::with_prefix("salt").var_name(URL_KEY),
            "SALT_NAMECHEAP_URL"
        );
    }

    #[test]
    fn test_toml_source_nested_table() {
        let source = TomlSource::parse(
            r#"
            [namecheap]
            url = "https://api.sandbox.namecheap.com/xml.response"
            name = "apiuser"
            client_ip = "198.51.100.7"
            "#,
        )
        .unwrap();

        assert_eq!(source.option(URL_KEY).as_deref(), Some(SANDBOX_URL));
        assert_eq!(source.option(NAME_KEY).as_deref(), Some("apiuser"));
        assert_eq!(source.option(KEY_KEY), None);
        assert_eq!(source.option("namecheap"), None);
        assert_eq!(source.option("other.url"), None);
    }

    #[test]
    fn test_toml_source_scalar_values() {
        let source = TomlSource::parse("[namecheap]\nkey = 12345\n").unwrap();
        assert_eq!(source.option(KEY_KEY).as_deref(), Some("12345"));
    }

    #[test]
    fn test_toml_source_invalid() {
        let err = TomlSource::parse("[namecheap\nurl =").unwrap_err();
        assert!(matches!(err, NamecheapError::Config(_)));
    }

    #[test]
    fn test_layered_first_hit_wins() {
        let mut top = HashMap::new();
        top.insert(KEY_KEY.to_string(), "override".to_string());

        let layered = Layered::new().with(top).with(full_map());
        let config = NamecheapConfig::from_source(&layered);

        assert_eq!(config.api_key, "override");
        assert_eq!(config.api_user, "apiuser");
    }

    #[test]
    fn test_layered_empty() {
        let layered = Layered::new();
        assert_eq!(layered.option(URL_KEY), None);
        assert!(format!("{layered:?}").contains("sources: 0"));
    }
}
