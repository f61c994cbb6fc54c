//! Row mapping between entity types and their SQLite tables.
//!
//! The domain types stay free of persistence concerns; this module owns
//! the `FromRow` implementations and the [`StoredRecord`] contract the
//! generic store operations are written against.

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

use crate::domain::{Contact, EntityKind, Registration, Requirements, SystemLog};

/// An entity kind readable from the local store.
///
/// Table name and searchable columns come from the kind tag; the
/// `FromRow` supertrait supplies the column mapping.
pub trait StoredRecord: for<'r> FromRow<'r, SqliteRow> + Send + Unpin {
    /// The kind tag this record belongs to.
    const KIND: EntityKind;
}

impl StoredRecord for Registration {
    const KIND: EntityKind = EntityKind::Registration;
}

impl StoredRecord for Requirements {
    const KIND: EntityKind = EntityKind::Requirements;
}

impl StoredRecord for Contact {
    const KIND: EntityKind = EntityKind::Contact;
}

impl StoredRecord for SystemLog {
    const KIND: EntityKind = EntityKind::SystemLog;
}

impl<'r> FromRow<'r, SqliteRow> for Registration {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            manufacturer: row.try_get("manufacturer")?,
            model: row.try_get("model")?,
            serial: row.try_get("serial")?,
            year: row.try_get("year")?,
            height: row.try_get("height")?,
            finish: row.try_get("finish")?,
            color_wood: row.try_get("color_wood")?,
            city_state: row.try_get("city_state")?,
            access: row.try_get("access")?,
            ip_address: row.try_get("ip_address")?,
            user_agent: row.try_get("user_agent")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl<'r> FromRow<'r, SqliteRow> for Requirements {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            school_name: row.try_get("school_name")?,
            current_pianos: row.try_get("current_pianos")?,
            preferred_type: row.try_get("preferred_type")?,
            teacher_name: row.try_get("teacher_name")?,
            background: row.try_get("background")?,
            commitment: row.try_get("commitment")?,
            ip_address: row.try_get("ip_address")?,
            user_agent: row.try_get("user_agent")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl<'r> FromRow<'r, SqliteRow> for Contact {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            message: row.try_get("message")?,
            ip_address: row.try_get("ip_address")?,
            user_agent: row.try_get("user_agent")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl<'r> FromRow<'r, SqliteRow> for SystemLog {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            level: row.try_get("level")?,
            message: row.try_get("message")?,
            data: row.try_get("data")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_kinds_match_their_tables() {
        assert_eq!(Registration::KIND.table(), "registrations");
        assert_eq!(Requirements::KIND.table(), "requirements");
        assert_eq!(Contact::KIND.table(), "contacts");
        assert_eq!(SystemLog::KIND.table(), "system_logs");
    }
}
