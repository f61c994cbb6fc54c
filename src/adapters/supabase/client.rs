//! Supabase REST implementation of the submission sink.
//!
//! Translates a single-entity create into an HTTP POST against the
//! project's `/rest/v1/{table}` endpoint with service-role
//! authorization, asking the created row to be echoed back. Only
//! creates cross this adapter; reads, deletes, and exports stay local.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header;
use secrecy::ExposeSecret;
use serde_json::Value;

use crate::config::RemoteStoreConfig;
use crate::domain::{EntityKind, NewContact, NewRegistration, NewRequirements, StoreError};
use crate::ports::SubmissionSink;

/// Bounded wait for one remote call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Remote table-store client.
pub struct SupabaseRestStore {
    config: RemoteStoreConfig,
    http: reqwest::Client,
}

impl SupabaseRestStore {
    /// Create a client for the given configuration.
    ///
    /// Credentials are checked per call, not here, so an unconfigured
    /// client can sit behind the gateway in local-only deployments.
    pub fn new(config: RemoteStoreConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Insert one row and return the created row echoed by the store.
    ///
    /// The payload's keys must already match the remote schema's column
    /// names; translation from internal naming is the caller's job.
    pub async fn create(&self, table: &str, payload: &Value) -> Result<Value, StoreError> {
        if !self.config.is_configured() {
            return Err(StoreError::Configuration(
                "remote creates require both REMOTE__URL and REMOTE__SERVICE_ROLE".to_string(),
            ));
        }

        let token = self.config.service_role.expose_secret();
        let response = self
            .http
            .post(self.config.rest_url(table))
            .timeout(REQUEST_TIMEOUT)
            .header("apikey", token)
            .bearer_auth(token)
            .header(header::CONTENT_TYPE, "application/json")
            .header("Prefer", "return=representation")
            .json(payload)
            .send()
            .await
            .map_err(|e| StoreError::RemoteTransport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::error!(%status, table, "remote store rejected create");
            return Err(StoreError::Remote {
                status: status.as_u16(),
                message,
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| StoreError::RemoteTransport(e.to_string()))?;
        Ok(normalize_row(body))
    }

    async fn create_returning_id(
        &self,
        kind: EntityKind,
        payload: &Value,
    ) -> Result<i64, StoreError> {
        let row = self.create(kind.table(), payload).await?;
        let id = row
            .get("id")
            .and_then(Value::as_i64)
            .ok_or_else(|| StoreError::RemoteTransport("created row missing id".to_string()))?;

        tracing::info!(%kind, id, "record created via remote store");
        Ok(id)
    }
}

#[async_trait]
impl SubmissionSink for SupabaseRestStore {
    async fn create_registration(&self, new: &NewRegistration) -> Result<i64, StoreError> {
        let payload = to_payload(new)?;
        self.create_returning_id(EntityKind::Registration, &payload)
            .await
    }

    async fn create_requirements(&self, new: &NewRequirements) -> Result<i64, StoreError> {
        let payload = to_payload(new)?;
        self.create_returning_id(EntityKind::Requirements, &payload)
            .await
    }

    async fn create_contact(&self, new: &NewContact) -> Result<i64, StoreError> {
        let payload = to_payload(new)?;
        self.create_returning_id(EntityKind::Contact, &payload)
            .await
    }
}

fn to_payload<T: serde::Serialize>(new: &T) -> Result<Value, StoreError> {
    serde_json::to_value(new).map_err(|e| StoreError::RemoteTransport(e.to_string()))
}

/// With `Prefer: return=representation` the store answers with either a
/// one-element array or a bare object; both normalize to one row.
fn normalize_row(body: Value) -> Value {
    match body {
        Value::Array(mut rows) if !rows.is_empty() => rows.remove(0),
        other => other,
    }
}
