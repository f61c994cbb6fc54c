//! Submission sink port.
//!
//! The narrow create contract shared by the local relational store and
//! the remote REST table-store. Only creation crosses this seam; reads,
//! deletes, and exports go exclusively to the local store.

use async_trait::async_trait;

use crate::domain::{NewContact, NewRegistration, NewRequirements, StoreError};

/// Write-side port for form submissions.
///
/// Each method persists one record and returns the identity assigned by
/// the backing store.
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    /// Persist a piano registration.
    async fn create_registration(&self, new: &NewRegistration) -> Result<i64, StoreError>;

    /// Persist a requirements submission.
    async fn create_requirements(&self, new: &NewRequirements) -> Result<i64, StoreError>;

    /// Persist a contact message.
    async fn create_contact(&self, new: &NewContact) -> Result<i64, StoreError>;
}
