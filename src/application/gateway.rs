//! Persistence gateway.
//!
//! One create, one backend: the routing flag is read at call time and
//! the submission goes to either the remote table-store or the local
//! database, never both. Reads, deletes, and exports do not pass
//! through here; they are local-only by contract.

use std::sync::Arc;

use crate::adapters::{SqliteStore, SupabaseRestStore};
use crate::domain::{NewSubmission, StoreError};
use crate::ports::{RoutingFlag, SubmissionSink};

/// Routes each create operation to exactly one storage backend.
pub struct PersistenceGateway {
    local: Arc<SqliteStore>,
    remote: Arc<SupabaseRestStore>,
    routing: Arc<dyn RoutingFlag>,
}

impl PersistenceGateway {
    /// Assemble a gateway over both adapters and a routing accessor.
    pub fn new(
        local: Arc<SqliteStore>,
        remote: Arc<SupabaseRestStore>,
        routing: Arc<dyn RoutingFlag>,
    ) -> Self {
        Self {
            local,
            remote,
            routing,
        }
    }

    /// Persist one submission and return the assigned identity.
    ///
    /// The routing flag is consulted on every call; a record routed to
    /// the remote store is not visible to the local-only listing,
    /// export, and delete operations.
    pub async fn create(&self, submission: &NewSubmission) -> Result<i64, StoreError> {
        let use_remote = self.routing.use_remote();
        let sink: &dyn SubmissionSink = if use_remote {
            self.remote.as_ref()
        } else {
            self.local.as_ref()
        };

        let result = match submission {
            NewSubmission::Registration(new) => sink.create_registration(new).await,
            NewSubmission::Requirements(new) => sink.create_requirements(new).await,
            NewSubmission::Contact(new) => sink.create_contact(new).await,
        };

        match &result {
            Ok(id) => {
                tracing::info!(
                    kind = %submission.kind(),
                    id,
                    backend = if use_remote { "remote" } else { "local" },
                    "submission persisted"
                );
            }
            Err(err) => {
                tracing::error!(kind = %submission.kind(), %err, "submission failed");
            }
        }

        result
    }
}
