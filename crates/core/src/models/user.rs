//! User and session models

use serde::{Deserialize, Serialize};

/// User role as assigned by the backend. Displayed only; the server
/// enforces permissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Cfo,
    IcMember,
    Accountant,
    Viewer,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "Admin"),
            Role::Cfo => write!(f, "CFO"),
            Role::IcMember => write!(f, "IC Member"),
            Role::Accountant => write!(f, "Accountant"),
            Role::Viewer => write!(f, "Viewer"),
        }
    }
}

/// Current user record from `/auth/me`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    pub role: Role,
    pub is_active: bool,
    #[serde(default)]
    pub created_at: String,
}

/// Credentials posted to `/auth/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Bearer token issued by `/auth/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
}
