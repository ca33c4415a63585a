//! # Corkboard Shared Library
//!
//! This crate contains the domain model, persistence layer, authentication
//! primitives and the access-controlled operation façade used by the
//! Corkboard API server.
//!
//! ## Module Organization
//!
//! - `models`: Users, boards, lists and cards, plus position ordering
//! - `auth`: Password hashing, JWT tokens, ownership authorization
//! - `store`: Transactional persistence (PostgreSQL and in-memory)
//! - `db`: Connection pool and migrations
//! - `service`: The operation façade (boards, lists, cards, accounts)
//! - `error`: Domain error type

pub mod auth;
pub mod db;
pub mod error;
pub mod models;
pub mod service;
pub mod store;

/// Current version of the Corkboard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
