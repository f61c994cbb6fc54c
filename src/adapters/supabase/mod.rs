//! Supabase adapter - remote REST table-store.

mod client;

pub use client::SupabaseRestStore;
