//! Authentication module for managing the user session.
//!
//! This module provides:
//! - `SessionManager`: owner of the authenticated identity and credential
//! - `SessionStore`: the persisted two-entry storage area behind it
//!
//! The manager wires itself into the transport layer through a credential
//! provider and an unauthorized handler rather than a shared default.

pub mod session;
pub mod store;

pub use session::{Session, SessionManager};
pub use store::{FileStore, MemoryStore, SessionStore};
