//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the core to its storage engines:
//! - `sqlite` - local relational store over an SQLite pool
//! - `supabase` - remote REST table-store client

pub mod sqlite;
pub mod supabase;

pub use sqlite::{SqliteStore, StoredRecord};
pub use supabase::SupabaseRestStore;
