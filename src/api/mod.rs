//! REST API client module for the hospital management backend.
//!
//! `ApiClient` owns the transport (reqwest with bearer-token injection and
//! 401 handling); the per-resource files add typed endpoint methods on it.
//! The backend authenticates via `POST /auth/login` and expects
//! `Authorization: Bearer <token>` on everything else.

pub mod appointments;
pub mod auth;
pub mod billing;
pub mod client;
pub mod doctors;
pub mod error;
pub mod inventory;
pub mod patients;
pub mod records;
pub mod reports;

pub use auth::{AuthResponse, RegisterRequest};
pub use client::{ApiClient, CredentialProvider, UnauthorizedHandler};
pub use error::{user_message, ApiError, FALLBACK_MESSAGE};
