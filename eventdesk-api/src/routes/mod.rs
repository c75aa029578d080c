/// API route handlers
///
/// - `health`: liveness and database check
/// - `auth`: register, login, activation, profile
/// - `category`: category CRUD
/// - `event`: event CRUD and slug lookup

pub mod auth;
pub mod category;
pub mod event;
pub mod health;
