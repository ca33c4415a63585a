/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Welcome document and health check
/// - `auth`: Registration, login, current user
/// - `users`: Profile, password and account deletion for the caller
/// - `boards`: Board CRUD and board detail
/// - `lists`: List CRUD and reorder
/// - `cards`: Card CRUD, reorder and move

pub mod auth;
pub mod boards;
pub mod cards;
pub mod health;
pub mod lists;
pub mod users;

use serde::{Deserialize, Deserializer};

/// Body of the `PATCH .../reorder` endpoints
#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub position: i32,
}

/// Deserializes a present field as `Some(value)`, so that with
/// `#[serde(default)]` an absent field stays `None` while an explicit `null`
/// becomes `Some(None)`.
pub(crate) fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}
