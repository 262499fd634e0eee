//! Authorization decisions returned to the host.

use http::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};

use crate::error::{PluginError, Result};

/// A response header to splice into the upstream response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderValueOption {
    pub key: String,
    pub value: String,
}

impl HeaderValueOption {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Allow/deny verdict for one request.
///
/// Extra response headers only ever accompany an allow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorizationDecision {
    allowed: bool,
    extra_response_headers: Vec<HeaderValueOption>,
}

impl AuthorizationDecision {
    /// Create an allow decision carrying the given response headers.
    pub fn allow(extra_response_headers: Vec<HeaderValueOption>) -> Self {
        Self {
            allowed: true,
            extra_response_headers,
        }
    }

    /// Create a bare deny decision. The host picks the status and body.
    pub fn deny() -> Self {
        Self {
            allowed: false,
            extra_response_headers: Vec::new(),
        }
    }

    pub fn is_allowed(&self) -> bool {
        self.allowed
    }

    pub fn extra_response_headers(&self) -> &[HeaderValueOption] {
        &self.extra_response_headers
    }

    /// Append the extra response headers onto `headers`, in order.
    ///
    /// Nothing is written if any header fails to encode.
    pub fn apply_to(&self, headers: &mut HeaderMap) -> Result<()> {
        let encoded = self
            .extra_response_headers
            .iter()
            .map(|h| {
                let name = HeaderName::from_bytes(h.key.as_bytes());
                let value = HeaderValue::from_str(&h.value);
                match (name, value) {
                    (Ok(name), Ok(value)) => Ok((name, value)),
                    _ => Err(PluginError::InvalidResponseHeader { key: h.key.clone() }),
                }
            })
            .collect::<Result<Vec<_>>>()?;

        for (name, value) in encoded {
            headers.append(name, value);
        }
        Ok(())
    }
}

/// Which branch of the check produced the decision.
///
/// Both deny outcomes produce the same decision; the split exists for logs
/// and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Required header present with an allowed value.
    Allowed,
    /// Required header present, value not in the allow-list.
    ValueMismatch,
    /// Required header absent.
    HeaderMissing,
}

impl CheckOutcome {
    pub fn is_allowed(self) -> bool {
        matches!(self, CheckOutcome::Allowed)
    }

    /// Metric label for this outcome.
    pub fn as_str(self) -> &'static str {
        match self {
            CheckOutcome::Allowed => "allowed",
            CheckOutcome::ValueMismatch => "value_mismatch",
            CheckOutcome::HeaderMissing => "header_missing",
        }
    }

    pub fn into_decision(self) -> AuthorizationDecision {
        match self {
            CheckOutcome::Allowed => AuthorizationDecision::allow(vec![HeaderValueOption::new(
                super::MATCHED_ALLOWED_HEADERS,
                "true",
            )]),
            CheckOutcome::ValueMismatch | CheckOutcome::HeaderMissing => {
                AuthorizationDecision::deny()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_into_decision() {
        let allow = CheckOutcome::Allowed.into_decision();
        assert!(allow.is_allowed());
        assert_eq!(
            allow.extra_response_headers(),
            &[HeaderValueOption::new("matched-allowed-headers", "true")]
        );

        for outcome in [CheckOutcome::ValueMismatch, CheckOutcome::HeaderMissing] {
            let deny = outcome.into_decision();
            assert!(!deny.is_allowed());
            assert!(deny.extra_response_headers().is_empty());
            assert_eq!(deny, AuthorizationDecision::deny());
        }
    }

    #[test]
    fn test_apply_to_appends_in_order() {
        let decision = AuthorizationDecision::allow(vec![
            HeaderValueOption::new("matched-allowed-headers", "true"),
            HeaderValueOption::new("x-extra", "1"),
        ]);
        let mut headers = HeaderMap::new();
        headers.insert("x-extra", HeaderValue::from_static("0"));

        decision.apply_to(&mut headers).unwrap();

        assert_eq!(headers.get("matched-allowed-headers").unwrap(), "true");
        let extra: Vec<_> = headers.get_all("x-extra").iter().collect();
        assert_eq!(extra, vec!["0", "1"]);
    }

    #[test]
    fn test_apply_to_rejects_invalid_header() {
        let decision = AuthorizationDecision::allow(vec![
            HeaderValueOption::new("x-ok", "1"),
            HeaderValueOption::new("bad header", "1"),
        ]);
        let mut headers = HeaderMap::new();

        let err = decision.apply_to(&mut headers).unwrap_err();

        assert!(matches!(err, PluginError::InvalidResponseHeader { ref key } if key == "bad header"));
        assert!(headers.is_empty());
    }

    #[test]
    fn test_decision_serializes() {
        let json = serde_json::to_value(CheckOutcome::Allowed.into_decision()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "allowed": true,
                "extra_response_headers": [{"key": "matched-allowed-headers", "value": "true"}]
            })
        );
    }
}
