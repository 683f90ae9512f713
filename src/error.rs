use thiserror::Error;

/// Why an `/ask` exchange failed.
///
/// The variants are kept apart for logging only. Callers of the conversation
/// controller never see them: every variant ends up as the same bot message.
#[derive(Error, Debug)]
pub enum AskError {
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Transport error: {0}")]
    Transport(reqwest::Error),

    #[error("Response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for AskError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AskError::Timeout
        } else {
            AskError::Transport(err)
        }
    }
}

/// Misuse of the two-phase submit protocol.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConversationError {
    #[error("No request is in flight")]
    NotInFlight,

    #[error("Ticket {0} does not match the request in flight")]
    StaleTicket(uuid::Uuid),
}
