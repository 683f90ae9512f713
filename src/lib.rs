//! Terminal chat client for a question-answering backend.
//!
//! Questions are posted as `{"question": ...}` to `{base_url}/ask` and the
//! `answer` of the reply is appended to the conversation.

pub mod client;
pub mod config;
pub mod conversation;
pub mod error;
pub mod events;
pub mod logging;
pub mod logo;
pub mod ui;

pub use client::{AskBackend, AskClient, AskResponse, NO_RESPONSE};
pub use config::Config;
pub use conversation::{Conversation, ConversationController, Phase, ERROR_REPLY};
pub use error::{AskError, ConversationError};
pub use events::{ChatMessage, Sender};
pub use logo::Logo;
