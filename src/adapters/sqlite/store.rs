//! SQLite implementation of the local store.
//!
//! Every operation checks a connection out of the process-wide pool for
//! its own duration; sessions are never shared across requests. Writes
//! run in an explicit transaction; an error before `commit` drops the
//! transaction guard, which rolls the work back, so a `StoreError` from
//! any write means the database was left untouched.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use super::schema::StoredRecord;
use crate::config::DatabaseConfig;
use crate::domain::{NewContact, NewRegistration, NewRequirements, StoreError};
use crate::ports::SubmissionSink;

/// Local relational store over a SQLite connection pool.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open the database described by `config`.
    ///
    /// The database file is created if missing. When
    /// `config.run_migrations` is set, the embedded migrations run
    /// before the store is handed out.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(&config.url)
            .map_err(|e| StoreError::local("connect", e))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout())
            .connect_with(options)
            .await
            .map_err(|e| StoreError::local("connect", e))?;

        let store = Self { pool };
        if config.run_migrations {
            store.migrate().await?;
        }
        Ok(store)
    }

    /// Run the embedded schema migrations.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::local("migrate", e))
    }

    /// Close the pool. Pending operations fail once this returns.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Fetch one record by id. `None` if no row matches.
    pub async fn get_by_id<E: StoredRecord>(&self, id: i64) -> Result<Option<E>, StoreError> {
        let sql = format!("SELECT * FROM {} WHERE id = ?", E::KIND.table());
        sqlx::query_as::<_, E>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::local("fetch", e))
    }

    /// Delete one record by id. Returns false if no row matched, so a
    /// repeated delete reports `false` rather than failing.
    pub async fn delete<E: StoredRecord>(&self, id: i64) -> Result<bool, StoreError> {
        let sql = format!("DELETE FROM {} WHERE id = ?", E::KIND.table());

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::local("begin", e))?;
        let result = sqlx::query(&sql)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| StoreError::local("delete", e))?;
        tx.commit()
            .await
            .map_err(|e| StoreError::local("commit", e))?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::info!(kind = %E::KIND, id, "record deleted");
        }
        Ok(deleted)
    }

    /// Count all rows of a kind.
    pub async fn count<E: StoredRecord>(&self) -> Result<i64, StoreError> {
        let sql = format!("SELECT COUNT(*) FROM {}", E::KIND.table());
        sqlx::query_scalar::<_, i64>(&sql)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::local("count", e))
    }

    /// Count rows matching a case-insensitive substring search across
    /// the kind's searchable columns.
    pub async fn count_matching<E: StoredRecord>(&self, term: &str) -> Result<i64, StoreError> {
        let sql = format!(
            "SELECT COUNT(*) FROM {} WHERE {}",
            E::KIND.table(),
            search_clause(E::KIND.searchable_columns()),
        );
        let pattern = search_pattern(term);

        let mut query = sqlx::query_scalar::<_, i64>(&sql);
        for _ in E::KIND.searchable_columns() {
            query = query.bind(pattern.clone());
        }
        query
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::local("count", e))
    }

    /// One page of rows, newest first. Ties on `created_at` break by id
    /// descending, which is stable because ids are assigned
    /// monotonically.
    pub async fn list_page<E: StoredRecord>(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<E>, StoreError> {
        let sql = format!(
            "SELECT * FROM {} ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
            E::KIND.table(),
        );
        sqlx::query_as::<_, E>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::local("list", e))
    }

    /// One page of rows matching a search term, newest first.
    ///
    /// The term matches as a substring, case-insensitively, OR-ed across
    /// the kind's searchable columns.
    pub async fn list_page_matching<E: StoredRecord>(
        &self,
        term: &str,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<E>, StoreError> {
        let sql = format!(
            "SELECT * FROM {} WHERE {} ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
            E::KIND.table(),
            search_clause(E::KIND.searchable_columns()),
        );
        let pattern = search_pattern(term);

        let mut query = sqlx::query_as::<_, E>(&sql);
        for _ in E::KIND.searchable_columns() {
            query = query.bind(pattern.clone());
        }
        query
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::local("list", e))
    }

    /// Every row of a kind, newest first. Exports are whole-collection
    /// operations; the caller accepts the memory cost.
    pub async fn list_all<E: StoredRecord>(&self) -> Result<Vec<E>, StoreError> {
        let sql = format!(
            "SELECT * FROM {} ORDER BY created_at DESC, id DESC",
            E::KIND.table(),
        );
        sqlx::query_as::<_, E>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::local("list", e))
    }

    /// Persist a log entry.
    pub async fn record_log(
        &self,
        level: &str,
        message: &str,
        data: Option<&serde_json::Value>,
    ) -> Result<i64, StoreError> {
        let serialized = match data {
            Some(value) => Some(
                serde_json::to_string(value).map_err(|e| StoreError::local("record log", e))?,
            ),
            None => None,
        };

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::local("begin", e))?;
        let result = sqlx::query(
            "INSERT INTO system_logs (level, message, data, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(level)
        .bind(message)
        .bind(serialized)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await
        .map_err(|e| StoreError::local("record log", e))?;
        tx.commit()
            .await
            .map_err(|e| StoreError::local("commit", e))?;

        Ok(result.last_insert_rowid())
    }

    /// Delete log entries beyond the most recent `keep` rows. Returns
    /// the number of rows removed.
    pub async fn prune_logs(&self, keep: i64) -> Result<u64, StoreError> {
        let result = sqlx::query(
            "DELETE FROM system_logs WHERE id NOT IN \
             (SELECT id FROM system_logs ORDER BY created_at DESC, id DESC LIMIT ?)",
        )
        .bind(keep)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::local("prune logs", e))?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl SubmissionSink for SqliteStore {
    async fn create_registration(&self, new: &NewRegistration) -> Result<i64, StoreError> {
        let now = Utc::now();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::local("begin", e))?;
        let result = sqlx::query(
            r#"
            INSERT INTO registrations (
                manufacturer, model, serial, year, height, finish,
                color_wood, city_state, access, ip_address, user_agent,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&new.manufacturer)
        .bind(&new.model)
        .bind(&new.serial)
        .bind(new.year)
        .bind(&new.height)
        .bind(&new.finish)
        .bind(&new.color_wood)
        .bind(&new.city_state)
        .bind(&new.access)
        .bind(&new.ip_address)
        .bind(&new.user_agent)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| StoreError::local("insert registration", e))?;
        tx.commit()
            .await
            .map_err(|e| StoreError::local("commit", e))?;

        Ok(result.last_insert_rowid())
    }

    async fn create_requirements(&self, new: &NewRequirements) -> Result<i64, StoreError> {
        let now = Utc::now();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::local("begin", e))?;
        let result = sqlx::query(
            r#"
            INSERT INTO requirements (
                school_name, current_pianos, preferred_type, teacher_name,
                background, commitment, ip_address, user_agent,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&new.school_name)
        .bind(&new.current_pianos)
        .bind(&new.preferred_type)
        .bind(&new.teacher_name)
        .bind(&new.background)
        .bind(&new.commitment)
        .bind(&new.ip_address)
        .bind(&new.user_agent)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| StoreError::local("insert requirements", e))?;
        tx.commit()
            .await
            .map_err(|e| StoreError::local("commit", e))?;

        Ok(result.last_insert_rowid())
    }

    async fn create_contact(&self, new: &NewContact) -> Result<i64, StoreError> {
        let now = Utc::now();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::local("begin", e))?;
        let result = sqlx::query(
            r#"
            INSERT INTO contacts (
                name, email, message, ip_address, user_agent,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&new.name)
        .bind(&new.email)
        .bind(&new.message)
        .bind(&new.ip_address)
        .bind(&new.user_agent)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| StoreError::local("insert contact", e))?;
        tx.commit()
            .await
            .map_err(|e| StoreError::local("commit", e))?;

        Ok(result.last_insert_rowid())
    }
}

/// `LOWER(col) LIKE ?` for each searchable column, OR-ed together.
fn search_clause(columns: &[&str]) -> String {
    let clauses: Vec<String> = columns
        .iter()
        .map(|col| format!("LOWER({}) LIKE ?", col))
        .collect();
    format!("({})", clauses.join(" OR "))
}

fn search_pattern(term: &str) -> String {
    format!("%{}%", term.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_clause_ors_all_columns() {
        let clause = search_clause(&["manufacturer", "model"]);
        assert_eq!(
            clause,
            "(LOWER(manufacturer) LIKE ? OR LOWER(model) LIKE ?)"
        );
    }

    #[test]
    fn search_pattern_lowercases_and_wraps() {
        assert_eq!(search_pattern("YaMa"), "%yama%");
    }
}
