//! Authentication endpoints.

// Allow dead code: the full backend surface is kept even where the CLI
// does not reach it yet
#![allow(dead_code)]

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::models::{Role, User};

use super::ApiClient;

/// Response shape shared by login and register.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl ApiClient {
    /// Authenticate with username/password. The backend takes the
    /// credentials form-encoded, not as JSON.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse> {
        self.post_form(
            "/auth/login",
            &[("username", username), ("password", password)],
        )
        .await
    }

    /// Create an account and authenticate in one step.
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        self.post("/auth/register", request).await
    }

    /// Fetch the identity behind the current credential.
    pub async fn current_user(&self) -> Result<User> {
        self.get("/auth/me").await
    }

    /// Tell the backend the session is over. Best-effort: local session
    /// teardown does not depend on this succeeding.
    pub async fn logout_remote(&self) {
        self.post_best_effort("/auth/logout").await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_auth_response() {
        let json = r#"{"access_token": "eyJhbGciOi.fake.token",
                       "token_type": "bearer",
                       "user": {"id": 3, "name": "Dr. Ama Owusu", "role": "Doctor"}}"#;
        let auth: AuthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(auth.access_token, "eyJhbGciOi.fake.token");
        assert_eq!(auth.user.role, Role::Doctor);
    }

    #[test]
    fn test_register_request_serializes_role_capitalized() {
        let request = RegisterRequest {
            name: "Ama".into(),
            email: "ama@example.org".into(),
            password: "s3cret".into(),
            role: Role::Patient,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["role"], "Patient");
    }
}
