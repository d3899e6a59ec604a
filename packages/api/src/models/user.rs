//! # Auth request/response bodies
//!
//! - [`LoginRequest`] / [`LoginResponse`]: `POST /auth/login`. The backend answers
//!   `{success, message, user?}` for both success and failure; a `token` field is
//!   accepted when present but the current backend never sends one.
//! - [`RegisterRequest`] / [`RegisterResponse`]: `POST /students/register`.
//! - [`UserInfo`]: the user record persisted under the `user` storage key.

use serde::{Deserialize, Serialize};

/// User information returned by login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserInfo {
    #[serde(default)]
    pub id: Option<i64>,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub user: Option<UserInfo>,
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RegisterResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}
