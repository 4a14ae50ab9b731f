//! # Tickdone Shared Library
//!
//! This crate contains the types, storage layer, and business primitives used
//! by the tickdone API server.
//!
//! ## Module Organization
//!
//! - `models`: Database models for active and pending user accounts
//! - `auth`: Password hashing and verification-token generation
//! - `email`: Verification email dispatch (Resend-backed, plus a mock)
//! - `db`: Connection pool and migration runner

pub mod auth;
pub mod db;
pub mod email;
pub mod models;

/// Current version of the tickdone shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
