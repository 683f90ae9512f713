//! Conversation state and the submit lifecycle.
//!
//! A submission is split in two halves so the network call can run
//! elsewhere: [`Conversation::begin_submit`] records the user message and
//! hands out a [`PendingAsk`] ticket, and [`Conversation::complete`] turns
//! the outcome into exactly one bot message. Only one ticket exists at a
//! time, which is what keeps responses in submission order.

use crate::client::{AskBackend, AskResponse};
use crate::error::{AskError, ConversationError};
use crate::events::{AppEvent, ChatMessage};
use crate::logo::Logo;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Bot text used for every failed exchange
pub const ERROR_REPLY: &str = "Error contacting server.";

/// Where the conversation is in the submit lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Sending,
}

/// An accepted submission whose answer has not arrived yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAsk {
    ticket: Uuid,
    question: String,
}

impl PendingAsk {
    pub fn ticket(&self) -> Uuid {
        self.ticket
    }

    /// The raw draft text, untrimmed
    pub fn question(&self) -> &str {
        &self.question
    }
}

/// Notified every time the message list grows
pub trait MessageObserver: Send {
    fn on_append(&mut self, message: &ChatMessage, len: usize);
}

impl<F> MessageObserver for F
where
    F: FnMut(&ChatMessage, usize) + Send,
{
    fn on_append(&mut self, message: &ChatMessage, len: usize) {
        self(message, len)
    }
}

/// In-memory state of one chat session
pub struct Conversation {
    messages: Vec<ChatMessage>,
    draft: String,
    in_flight: Option<Uuid>,
    logo: Option<Logo>,
    observers: Vec<Box<dyn MessageObserver>>,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            draft: String::new(),
            in_flight: None,
            logo: None,
            observers: Vec::new(),
        }
    }

    /// Register an observer for message appends
    pub fn subscribe(&mut self, observer: impl MessageObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Messages in display order
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, draft: impl Into<String>) {
        self.draft = draft.into();
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn phase(&self) -> Phase {
        if self.is_in_flight() {
            Phase::Sending
        } else {
            Phase::Idle
        }
    }

    /// Whether a submission of the current draft would be accepted
    pub fn can_submit(&self) -> bool {
        !self.is_in_flight() && !self.draft.trim().is_empty()
    }

    pub fn logo(&self) -> Option<&Logo> {
        self.logo.as_ref()
    }

    /// Replace the logo. No validation is performed.
    pub fn set_logo(&mut self, logo: Logo) {
        debug!(mime = logo.mime(), bytes = logo.bytes().len(), "logo replaced");
        self.logo = Some(logo);
    }

    /// First half of a submission.
    ///
    /// Returns `None` (and changes nothing) when a request is already in
    /// flight or the draft is blank. Otherwise appends the user message,
    /// clears the draft and enters [`Phase::Sending`].
    pub fn begin_submit(&mut self, draft: &str) -> Option<PendingAsk> {
        if self.in_flight.is_some() {
            debug!("submission ignored: a request is already in flight");
            return None;
        }
        if draft.trim().is_empty() {
            return None;
        }

        let ticket = Uuid::new_v4();
        self.in_flight = Some(ticket);
        self.draft.clear();
        self.push(ChatMessage::user(draft));
        info!(%ticket, "question submitted");

        Some(PendingAsk {
            ticket,
            question: draft.to_string(),
        })
    }

    /// Submit whatever is in the draft
    pub fn submit_draft(&mut self) -> Option<PendingAsk> {
        let draft = self.draft.clone();
        self.begin_submit(&draft)
    }

    /// Second half of a submission: append the bot reply and return to
    /// [`Phase::Idle`]. Failures become [`ERROR_REPLY`].
    pub fn complete(
        &mut self,
        ticket: Uuid,
        outcome: Result<AskResponse, AskError>,
    ) -> Result<&ChatMessage, ConversationError> {
        match self.in_flight {
            None => return Err(ConversationError::NotInFlight),
            Some(current) if current != ticket => {
                return Err(ConversationError::StaleTicket(ticket));
            }
            Some(_) => {}
        }

        let text = match outcome {
            Ok(response) => response.answer_text().to_string(),
            Err(err) => {
                warn!(%ticket, error = %err, "ask failed");
                ERROR_REPLY.to_string()
            }
        };

        self.in_flight = None;
        self.push(ChatMessage::bot(text));
        info!(%ticket, "answer received");

        Ok(&self.messages[self.messages.len() - 1])
    }

    fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
        let len = self.messages.len();
        let last = &self.messages[len - 1];
        for observer in self.observers.iter_mut() {
            observer.on_append(last, len);
        }
    }
}

/// Conversation plus the backend that answers it
pub struct ConversationController<B> {
    conversation: Conversation,
    backend: Arc<B>,
}

impl<B: AskBackend + 'static> ConversationController<B> {
    pub fn new(backend: B) -> Self {
        Self::with_backend(Arc::new(backend))
    }

    pub fn with_backend(backend: Arc<B>) -> Self {
        Self {
            conversation: Conversation::new(),
            backend,
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn conversation_mut(&mut self) -> &mut Conversation {
        &mut self.conversation
    }

    pub fn set_logo(&mut self, logo: Logo) {
        self.conversation.set_logo(logo);
    }

    /// Submit `draft` and wait for the answer.
    ///
    /// Returns the bot message, or `None` if the submission was rejected.
    pub async fn submit(&mut self, draft: &str) -> Option<&ChatMessage> {
        let pending = self.conversation.begin_submit(draft)?;
        let outcome = self.backend.ask(pending.question()).await;
        self.conversation.complete(pending.ticket(), outcome).ok()
    }

    /// Submit the stored draft without waiting. The outcome is delivered
    /// as [`AppEvent::AskFinished`] and must be fed back through
    /// [`ConversationController::finish`].
    pub fn submit_in_background(&mut self, events: mpsc::UnboundedSender<AppEvent>) -> bool {
        let Some(pending) = self.conversation.submit_draft() else {
            return false;
        };

        let backend = Arc::clone(&self.backend);
        tokio::spawn(async move {
            let outcome = backend.ask(pending.question()).await;
            let _ = events.send(AppEvent::AskFinished {
                ticket: pending.ticket(),
                outcome,
            });
        });

        true
    }

    pub fn finish(
        &mut self,
        ticket: Uuid,
        outcome: Result<AskResponse, AskError>,
    ) -> Result<&ChatMessage, ConversationError> {
        self.conversation.complete(ticket, outcome)
    }
}
