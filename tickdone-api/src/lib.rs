//! # Tickdone API Server Library
//!
//! This library provides the core functionality for the tickdone API server:
//! user registration with email verification, and login.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
