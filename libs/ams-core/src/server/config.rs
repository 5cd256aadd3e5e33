use serde::{Deserialize, Serialize};

/// Settings of the HTTP entrypoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Path under which the API is served.
    pub prefix: String,
    /// Maximum accepted request body, in bytes.
    pub body_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            prefix: "/api/accounts_mgmt/v1".to_owned(),
            body_limit: 2 * 1024 * 1024,
        }
    }
}
