//! The chat controller: an append-only log plus an `Idle`/`Submitting`
//! state machine that allows one chart request in flight at a time.
//!
//! Submission is split in two so callers can drive the request themselves:
//! [`ChatSession::begin_submit`] records the user message and hands back the
//! request to send, and [`ChatSession::resolve`] turns its outcome into the
//! assistant reply. [`ChatSession::send`] does both around a [`ChartClient`].

use uuid::Uuid;

use crate::chat::client::{ChartClient, ChartResponse};
use crate::chat::{FAILURE_TEXT, IMAGE_CAPTION, NO_IMAGE_TEXT, SUGGESTED_PROMPTS};
use crate::error::Result;
use crate::models::ChatMessage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatState {
    #[default]
    Idle,
    Submitting,
}

/// Notifications for the renderer, which scrolls to the newest entry on each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatEvent {
    MessageAppended(Uuid),
    LoadingChanged(bool),
}

/// A chart request accepted by [`ChatSession::begin_submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartRequest {
    pub prompt: String,
}

#[derive(Debug, Default)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    state: ChatState,
    input: String,
    events: Vec<ChatEvent>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the log with a system message.
    pub fn with_system_prompt(content: impl Into<String>) -> Self {
        let mut session = Self::new();
        session.messages.push(ChatMessage::system(content));
        session
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn state(&self) -> ChatState {
        self.state
    }

    /// Drives the typing indicator and disables the input.
    pub fn is_submitting(&self) -> bool {
        self.state == ChatState::Submitting
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Fill the input with suggested prompt `index`. Returns `false` if there
    /// is no such prompt.
    pub fn use_suggestion(&mut self, index: usize) -> bool {
        match SUGGESTED_PROMPTS.get(index) {
            Some(prompt) => {
                self.input = (*prompt).to_string();
                true
            }
            None => false,
        }
    }

    /// Take the pending renderer notifications.
    pub fn drain_events(&mut self) -> Vec<ChatEvent> {
        std::mem::take(&mut self.events)
    }

    fn append(&mut self, message: ChatMessage) -> &ChatMessage {
        self.events.push(ChatEvent::MessageAppended(message.id));
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    fn set_state(&mut self, state: ChatState) {
        if self.state != state {
            self.state = state;
            self.events.push(ChatEvent::LoadingChanged(state == ChatState::Submitting));
        }
    }

    /// `Idle → Submitting`.
    ///
    /// Returns `None` without side effects for a blank prompt or while a
    /// request is already in flight. Otherwise appends the user message,
    /// clears the input and returns the request to send.
    pub fn begin_submit(&mut self, prompt: &str) -> Option<ChartRequest> {
        let prompt = prompt.trim();
        if prompt.is_empty() || self.is_submitting() {
            return None;
        }

        self.append(ChatMessage::user(prompt));
        self.input.clear();
        self.set_state(ChatState::Submitting);
        Some(ChartRequest {
            prompt: prompt.to_string(),
        })
    }

    /// [`begin_submit`](Self::begin_submit) with the current input field.
    pub fn begin_submit_input(&mut self) -> Option<ChartRequest> {
        let prompt = self.input.clone();
        self.begin_submit(&prompt)
    }

    /// `Submitting → Idle`: append the assistant reply for `outcome`.
    ///
    /// Returns `None` if no request is in flight.
    pub fn resolve(&mut self, outcome: Result<ChartResponse>) -> Option<&ChatMessage> {
        if !self.is_submitting() {
            return None;
        }

        let reply = match outcome {
            Ok(resp) => match resp.image() {
                Some(image) => ChatMessage::assistant_image(IMAGE_CAPTION, image),
                None => ChatMessage::assistant_text(NO_IMAGE_TEXT),
            },
            Err(e) => {
                tracing::error!(error = %e, "chart generation failed");
                ChatMessage::assistant_text(FAILURE_TEXT)
            }
        };

        self.set_state(ChatState::Idle);
        Some(self.append(reply))
    }

    /// Run a full submission of `prompt` through `client`.
    pub fn send(&mut self, client: &ChartClient<'_>, prompt: &str) -> Option<&ChatMessage> {
        let request = self.begin_submit(prompt)?;
        let outcome = client.generate(&request.prompt);
        self.resolve(outcome)
    }

    /// Run a full submission of the current input field.
    pub fn submit(&mut self, client: &ChartClient<'_>) -> Option<&ChatMessage> {
        let prompt = self.input.clone();
        self.send(client, &prompt)
    }
}
