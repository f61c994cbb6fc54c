//! Persisted entity kinds and their submission payloads.
//!
//! Each entity is an independent record type with a surrogate integer id
//! assigned by the store on creation. `created_at` is set once at
//! insertion; `updated_at` advances on every field mutation. Serialization
//! via `serde` is the canonical flat field-to-primitive mapping, with
//! timestamps rendered as ISO-8601 text or `null` when unset.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Tag identifying one of the four persisted entity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Registration,
    Requirements,
    Contact,
    SystemLog,
}

impl EntityKind {
    /// Table name in both the local and the remote store.
    pub fn table(&self) -> &'static str {
        match self {
            EntityKind::Registration => "registrations",
            EntityKind::Requirements => "requirements",
            EntityKind::Contact => "contacts",
            EntityKind::SystemLog => "system_logs",
        }
    }

    /// Columns searched by the admin listing, OR-ed together with a
    /// case-insensitive substring match.
    pub fn searchable_columns(&self) -> &'static [&'static str] {
        match self {
            EntityKind::Registration => &["manufacturer", "model", "serial", "city_state"],
            EntityKind::Requirements => &[
                "school_name",
                "current_pianos",
                "preferred_type",
                "teacher_name",
                "background",
                "commitment",
            ],
            EntityKind::Contact => &["name", "email", "message"],
            EntityKind::SystemLog => &["level", "message"],
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EntityKind::Registration => "registration",
            EntityKind::Requirements => "requirements",
            EntityKind::Contact => "contact",
            EntityKind::SystemLog => "system_log",
        };
        write!(f, "{}", s)
    }
}

/// Piano donation registration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Registration {
    pub id: i64,
    pub manufacturer: String,
    pub model: String,
    pub serial: String,
    pub year: i64,
    pub height: String,
    pub finish: String,
    pub color_wood: String,
    pub city_state: String,
    pub access: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Institutional requirements submission.
///
/// All six content fields are optional at storage time; the submission
/// layer enforces that at least one is present before a payload reaches
/// the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Requirements {
    pub id: i64,
    pub school_name: Option<String>,
    pub current_pianos: Option<String>,
    pub preferred_type: Option<String>,
    pub teacher_name: Option<String>,
    pub background: Option<String>,
    pub commitment: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Contact-form message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contact {
    pub id: i64,
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Persisted log entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemLog {
    pub id: i64,
    pub level: String,
    pub message: String,
    /// Structured payload, serialized as a JSON string.
    pub data: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// New registration payload, already validated by the caller.
///
/// Field names match the remote table's column names, so the payload
/// serializes directly into a Supabase REST body.
#[derive(Debug, Clone, Serialize)]
pub struct NewRegistration {
    pub manufacturer: String,
    pub model: String,
    pub serial: String,
    pub year: i64,
    pub height: String,
    pub finish: String,
    pub color_wood: String,
    pub city_state: String,
    pub access: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// New requirements payload.
#[derive(Debug, Clone, Serialize)]
pub struct NewRequirements {
    pub school_name: Option<String>,
    pub current_pianos: Option<String>,
    pub preferred_type: Option<String>,
    pub teacher_name: Option<String>,
    pub background: Option<String>,
    pub commitment: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// New contact-form payload.
#[derive(Debug, Clone, Serialize)]
pub struct NewContact {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// A submission routed through the persistence gateway.
///
/// One variant per creatable entity kind; the gateway dispatches the
/// whole variant to exactly one backend.
#[derive(Debug, Clone)]
pub enum NewSubmission {
    Registration(NewRegistration),
    Requirements(NewRequirements),
    Contact(NewContact),
}

impl NewSubmission {
    /// The entity kind this submission creates.
    pub fn kind(&self) -> EntityKind {
        match self {
            NewSubmission::Registration(_) => EntityKind::Registration,
            NewSubmission::Requirements(_) => EntityKind::Requirements,
            NewSubmission::Contact(_) => EntityKind::Contact,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_names_are_distinct() {
        let kinds = [
            EntityKind::Registration,
            EntityKind::Requirements,
            EntityKind::Contact,
            EntityKind::SystemLog,
        ];
        for a in &kinds {
            for b in &kinds {
                if a != b {
                    assert_ne!(a.table(), b.table());
                }
            }
        }
    }

    #[test]
    fn every_kind_has_searchable_columns() {
        for kind in [
            EntityKind::Registration,
            EntityKind::Requirements,
            EntityKind::Contact,
            EntityKind::SystemLog,
        ] {
            assert!(!kind.searchable_columns().is_empty());
        }
    }

    #[test]
    fn submission_kind_matches_variant() {
        let submission = NewSubmission::Contact(NewContact {
            name: None,
            email: None,
            message: "hello".to_string(),
            ip_address: None,
            user_agent: None,
        });
        assert_eq!(submission.kind(), EntityKind::Contact);
    }

    #[test]
    fn unset_timestamps_serialize_as_null() {
        let contact = Contact {
            id: 1,
            name: Some("Ada".to_string()),
            email: None,
            message: "hello".to_string(),
            ip_address: None,
            user_agent: None,
            created_at: None,
            updated_at: None,
        };
        let value = serde_json::to_value(&contact).unwrap();
        assert!(value["created_at"].is_null());
        assert_eq!(value["name"], "Ada");
    }

    #[test]
    fn set_timestamps_serialize_as_iso8601() {
        let now = Utc::now();
        let log = SystemLog {
            id: 7,
            level: "info".to_string(),
            message: "started".to_string(),
            data: None,
            created_at: Some(now),
        };
        let value = serde_json::to_value(&log).unwrap();
        let rendered = value["created_at"].as_str().unwrap();
        assert!(rendered.starts_with(&now.format("%Y-%m-%dT").to_string()));
    }
}
