//! Mailbox storage for whisperbox.
//!
//! Each account owns a mailbox of anonymous messages. This module holds
//! the message entity and its repository.

mod repository;
mod types;

pub use repository::MessageRepository;
pub use types::{Message, NewMessage, MAX_CONTENT_LENGTH, MIN_CONTENT_LENGTH};
