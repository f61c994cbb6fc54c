//! Clavisnova - Persistence & Export Core
//!
//! This crate implements the storage gateway for the Clavisnova piano
//! donation service: form submissions are routed to one of two
//! interchangeable backends (a local SQLite store or the Supabase REST
//! table-store), admin listings are served with pagination and search,
//! and full collections render to spreadsheet or delimited-text exports.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
