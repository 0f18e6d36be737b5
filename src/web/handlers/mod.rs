//! API handlers for the Web API.

pub mod account;
pub mod auth;
pub mod messages;

pub use account::*;
pub use auth::*;
pub use messages::*;
