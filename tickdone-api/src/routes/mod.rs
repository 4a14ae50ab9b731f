/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Registration and login endpoints
/// - `verify`: Email verification link target

pub mod auth;
pub mod health;
pub mod verify;
