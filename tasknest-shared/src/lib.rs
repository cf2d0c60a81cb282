//! # Tasknest Shared Library
//!
//! This crate contains the models, storage operations, and authentication
//! primitives shared by the tasknest API server.
//!
//! ## Module Organization
//!
//! - `models`: Database models and data structures
//! - `auth`: Password hashing, JWT issuance, and bearer-token resolution
//! - `db`: Connection pool and migration runner

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the tasknest shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
