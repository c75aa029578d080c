/// Database models for EventDesk
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `user`: User accounts and authentication
/// - `category`: Event categories
/// - `event`: Events, searchable and addressable by slug

pub mod category;
pub mod event;
pub mod user;
