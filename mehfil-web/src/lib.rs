//! # Mehfil-e-Shayari Web Server Library
//!
//! Public pages for published shayari and a session-authenticated admin area
//! for managing them.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `extract`: Per-request storage connection and path extractors
//! - `middleware`: Sessions, the admin guard and security headers
//! - `routes`: Route handlers
//! - `views`: Handlebars page rendering

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod views;
