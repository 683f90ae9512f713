//! Conversation UI components for the chat window

pub mod commands;
pub mod composer;
pub mod header;
pub mod history;
pub mod manager;
pub mod status;

pub use commands::{get_help_text, parse_slash_command, ParsedCommand, SlashCommand};
pub use composer::{ComposerResult, ConversationComposer};
pub use header::ChatHeader;
pub use history::{ConversationHistory, HistoryScroll};
pub use manager::{ConversationAction, ConversationManager};
pub use status::{SendButton, StatusLine};
