//! Per-request header view handed to the authorizer.

use std::collections::HashMap;

use http::HeaderMap;

/// Headers of the HTTP request under evaluation.
///
/// Names are kept exactly as delivered by the host. When the same name shows
/// up more than once while building the request, the last value wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorizationRequest {
    headers: HashMap<String, String>,
}

impl AuthorizationRequest {
    /// Create a request from an already collapsed header mapping.
    pub fn new(headers: HashMap<String, String>) -> Self {
        Self { headers }
    }

    /// Look up a header by exact name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// All headers of the request.
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }
}

impl From<HashMap<String, String>> for AuthorizationRequest {
    fn from(headers: HashMap<String, String>) -> Self {
        Self::new(headers)
    }
}

impl<K, V> FromIterator<(K, V)> for AuthorizationRequest
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            headers: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl From<&HeaderMap> for AuthorizationRequest {
    /// Values that are not valid UTF-8 are skipped; they could never equal
    /// a configured allowed value.
    fn from(map: &HeaderMap) -> Self {
        map.iter()
            .filter_map(|(name, value)| {
                std::str::from_utf8(value.as_bytes())
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect()
    }
}
