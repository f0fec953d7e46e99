//! # Mehfil-e-Shayari Shared Library
//!
//! This crate contains the data model, storage backends and authentication
//! primitives used by the Mehfil web server and the provisioning CLI.
//!
//! ## Module Organization
//!
//! - `models`: Shayari and admin records plus their repository traits
//! - `db`: Storage abstraction with MySQL, SQLite and PostgreSQL backends
//! - `auth`: Password hashing, server-side sessions and admin provisioning

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the Mehfil shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
