//! Web API module for whisperbox.
//!
//! This module provides the REST API: account sign-up and verification,
//! login, mailbox access for owners, and the public anonymous send
//! endpoint.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::create_router;
pub use server::WebServer;
