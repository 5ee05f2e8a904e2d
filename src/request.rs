use std::fmt;

/// Parameter whose value is never logged.
const API_KEY_PARAM: &str = "ApiKey";

/// Placeholder shown instead of the `ApiKey` value.
const REDACTED: &str = "***";

/// HTTP method used to send a request.
///
/// `Get` puts the parameters in the query string, `Post` sends them as an
/// `application/x-www-form-urlencoded` body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
}

impl Method {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for a single API call.
///
/// Keeps insertion order. Inserting an existing key replaces its value in place.
///
/// # Example
///
/// ```
/// use namecheap_rs::RequestParams;
///
/// let params = RequestParams::new()
///     .with("Command", "namecheap.domains.check")
///     .with("DomainList", "example.com,example.net");
///
/// assert_eq!(params.get("DomainList"), Some("example.com,example.net"));
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RequestParams {
    entries: Vec<(String, String)>,
}

impl RequestParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, returning the previous value if there was one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Pairs in the shape `reqwest` expects for `.query()` and `.form()`.
    pub(crate) fn as_pairs(&self) -> &[(String, String)] {
        &self.entries
    }

    /// Like [`iter`](Self::iter), but with the `ApiKey` value replaced by `***`.
    ///
    /// Every log line and debug rendering of parameters goes through this.
    pub fn redacted_iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter().map(|(k, v)| {
            if k.eq_ignore_ascii_case(API_KEY_PARAM) {
                (k, REDACTED)
            } else {
                (k, v)
            }
        })
    }

    /// Renders the parameters as a query string with `ApiKey` masked.
    ///
    /// Used for logging only; never sent on the wire.
    #[must_use]
    pub fn redacted_query(&self) -> String {
        self.redacted_iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for RequestParams {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RequestParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        params.extend(iter);
        params
    }
}

impl fmt::Debug for RequestParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.redacted_iter()).finish()
    }
}
