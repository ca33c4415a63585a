/// Middleware modules for the API server
///
/// - `auth`: Bearer token authentication for the `/v1` resource routes
/// - `security`: Security headers on every response

pub mod auth;
pub mod security;
