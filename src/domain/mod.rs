//! Domain - Entity schema and shared error taxonomy.
//!
//! The four persisted entity kinds, their submission payloads, and the
//! error types shared by both storage backends. No persistence logic
//! lives here; adapters map these types to their engines.

mod entity;
mod errors;

pub use entity::{
    Contact, EntityKind, NewContact, NewRegistration, NewRequirements, NewSubmission,
    Registration, Requirements, SystemLog,
};
pub use errors::StoreError;
