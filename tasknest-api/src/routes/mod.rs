/// API route handlers
///
/// Organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Registration, login, and the current-user endpoint
/// - `todos`: To-do item CRUD and listing

pub mod auth;
pub mod health;
pub mod todos;
