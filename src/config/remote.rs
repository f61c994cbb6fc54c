//! Remote table-store configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Supabase REST configuration.
///
/// Both fields default to empty; [`RemoteStoreConfig::is_configured`]
/// gates every remote call so an unconfigured deployment fails fast
/// without network I/O.
#[derive(Clone, Deserialize)]
pub struct RemoteStoreConfig {
    /// Project base URL (https://<project>.supabase.co).
    #[serde(default)]
    pub url: String,

    /// Service-role bearer token.
    #[serde(default = "empty_secret")]
    pub service_role: SecretString,
}

impl RemoteStoreConfig {
    /// Create a configuration from explicit values.
    pub fn new(url: impl Into<String>, service_role: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            service_role: SecretString::new(service_role.into()),
        }
    }

    /// Whether both the base URL and the service-role token are present.
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty() && !self.service_role.expose_secret().is_empty()
    }

    /// REST endpoint for a table.
    pub fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.url.trim_end_matches('/'), table)
    }

    /// Validate remote store configuration.
    ///
    /// An entirely empty configuration is valid (remote routing disabled);
    /// a partially filled one is not.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let has_url = !self.url.is_empty();
        let has_token = !self.service_role.expose_secret().is_empty();

        if has_url != has_token {
            return Err(ValidationError::PartialRemoteConfig);
        }
        if has_url && !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(ValidationError::InvalidRemoteUrl);
        }
        Ok(())
    }
}

impl Default for RemoteStoreConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            service_role: empty_secret(),
        }
    }
}

// Keep the token out of debug output.
impl std::fmt::Debug for RemoteStoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteStoreConfig")
            .field("url", &self.url)
            .field("service_role", &"[REDACTED]")
            .finish()
    }
}

fn empty_secret() -> SecretString {
    SecretString::new(String::new())
}
