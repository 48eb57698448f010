//! One-shot trip reporting job.
//!
//! Connects to a PostgreSQL database, runs three fixed aggregate queries
//! over the `trips` table, and emits a JSON summary to `/out/summary.json`
//! and to stdout. Intended to run once per container invocation and exit.
//!
//! # Modules
//!
//! - `config`: environment-driven settings with defaults.
//! - `db`: database session with connect-with-retry.
//! - `models`: summary document types and assembly.
//! - `report`: the three aggregate queries.
//! - `output`: JSON persistence and console echo.

// Re-export primary modules for shared use in tests and the binary
pub mod config;
pub mod db;
pub mod models;
pub mod output;
pub mod report;
