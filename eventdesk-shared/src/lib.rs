//! # EventDesk Shared Library
//!
//! Domain types, persistence and authentication used by the EventDesk API.
//!
//! ## Module Organization
//!
//! - `auth`: credential hashing, tokens, the auth pipeline and middleware
//! - `db`: connection pool and migrations
//! - `mail`: template rendering and delivery
//! - `models`: users, categories and events
//! - `pagination`: list query parameters and page metadata
//! - `store`: user persistence behind a trait
//! - `validation`: declarative payload schemas

pub mod auth;
pub mod db;
pub mod mail;
pub mod models;
pub mod pagination;
pub mod store;
pub mod validation;

/// Current version of the EventDesk shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
