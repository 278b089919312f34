//! One-shot flash messages, queued on the write path and drained on the next page render.

use std::collections::{HashMap, VecDeque};

use crate::types::flash::{FlashKind, FlashMessage};

/// Pending flash messages of a single session, in insertion order.
#[derive(Debug, Default, Clone)]
pub struct FlashQueue {
    messages: VecDeque<FlashMessage>,
}

impl FlashQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: FlashKind, text: impl Into<String>) {
        self.messages.push_back(FlashMessage { kind, text: text.into() });
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.push(FlashKind::Success, text);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(FlashKind::Error, text);
    }

    /// Removes and returns every pending message. A second call returns nothing.
    pub fn drain(&mut self) -> Vec<FlashMessage> {
        self.messages.drain(..).collect()
    }

    /// Pending messages without consuming them.
    pub fn peek(&self) -> impl Iterator<Item = &FlashMessage> {
        self.messages.iter()
    }

    pub fn count(&self, kind: FlashKind) -> usize {
        self.messages.iter().filter(|m| m.kind == kind).count()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Flash queues keyed by session identifier.
#[derive(Debug, Default)]
pub struct FlashManager {
    sessions: HashMap<String, FlashQueue>,
}

impl FlashManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// The queue of `session`, created on first use.
    pub fn queue(&mut self, session: &str) -> &mut FlashQueue {
        self.sessions.entry(session.to_string()).or_default()
    }

    /// Pending messages of `session`, left in place. Never creates an entry.
    pub fn pending(&self, session: &str) -> Vec<FlashMessage> {
        self.sessions
            .get(session)
            .map(|queue| queue.peek().cloned().collect())
            .unwrap_or_default()
    }

    /// Drains the queue of `session` and forgets the session entry.
    pub fn take(&mut self, session: &str) -> Vec<FlashMessage> {
        self.sessions
            .remove(session)
            .map(|mut queue| queue.drain())
            .unwrap_or_default()
    }

    /// Number of sessions currently holding a queue.
    pub fn pending_sessions(&self) -> usize {
        self.sessions.len()
    }
}
