//! Shared helpers for integration tests.

use std::path::PathBuf;
use std::sync::Arc;

use required_header_authz::plugin::{initialize, AuthService, RequiredHeaderPlugin};
use required_header_authz::AuthorizationRequest;
use serde_json::json;

/// Build and start the plugin's auth service for `x-api-key` ∈ {secret1, secret2}.
#[allow(dead_code)]
pub fn api_key_service() -> Arc<dyn AuthService> {
    service_for("x-api-key", &["secret1", "secret2"])
}

/// Build and start the plugin's auth service through the host path.
#[allow(dead_code)]
pub fn service_for(required_header: &str, allowed_values: &[&str]) -> Arc<dyn AuthService> {
    let service = initialize(
        &RequiredHeaderPlugin,
        json!({
            "required_header": required_header,
            "allowed_values": allowed_values,
        }),
    )
    .unwrap();
    service
        .start(&required_header_authz::observability::NoopLog)
        .unwrap();
    Arc::from(service)
}

#[allow(dead_code)]
pub fn request(pairs: &[(&str, &str)]) -> AuthorizationRequest {
    pairs.iter().copied().collect()
}

/// Write a config file under the system temp dir. Each test passes its own name.
#[allow(dead_code)]
pub fn write_config(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "required-header-authz-{}-{}.toml",
        std::process::id(),
        name
    ));
    std::fs::write(&path, contents).unwrap();
    path
}
