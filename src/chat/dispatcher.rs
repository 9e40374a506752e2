use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, error};

use crate::chat::message::{MessageDraft, Row};
use crate::chat::store::ConversationStore;

/// Shown instead of an answer when the backend call fails for any reason.
pub const FALLBACK_TEXT: &str = "Error connecting to backend.";

/// Decoded answer for one question, already lifted out of the wire shape.
#[derive(Debug, Clone)]
pub struct QueryReply {
    pub response: String,
    pub dax_query: Option<String>,
    pub rows: Vec<Row>,
}

#[async_trait]
pub trait QueryBackend: Send + Sync {
    async fn query(&self, question: &str) -> Result<QueryReply>;
}

#[async_trait]
impl<T: QueryBackend + ?Sized> QueryBackend for Arc<T> {
    async fn query(&self, question: &str) -> Result<QueryReply> {
        (**self).query(question).await
    }
}

/// Lifecycle of the single in-flight request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    Idle,
    Pending,
    Settled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A user/assistant message pair was appended.
    Completed,
    /// Blank input: nothing appended, no network call.
    Ignored,
}

/// Shared handle to the busy flag. Advisory backpressure only: callers use
/// it to disable the send control while a request is outstanding, it does
/// not queue or cancel anything.
#[derive(Debug, Clone, Default)]
pub struct BusyFlag(Arc<AtomicBool>);

impl BusyFlag {
    pub fn get(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn set(&self, value: bool) {
        self.0.store(value, Ordering::SeqCst);
    }
}

/// Clears the busy flag on drop, so every exit path resets it.
struct BusyGuard<'a> {
    flag: &'a BusyFlag,
}

impl<'a> BusyGuard<'a> {
    fn engage(flag: &'a BusyFlag) -> Self {
        flag.set(true);
        Self { flag }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

/// One dispatch cycle: append the user message, call the backend, append
/// exactly one assistant message (answer or fallback). Backend errors are
/// logged and converted, never propagated past this boundary.
pub struct Dispatcher<B> {
    backend: B,
    store: ConversationStore,
    state: RequestState,
    busy: BusyFlag,
}

impl<B: QueryBackend> Dispatcher<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            store: ConversationStore::new(),
            state: RequestState::Idle,
            busy: BusyFlag::default(),
        }
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    pub fn state(&self) -> RequestState {
        self.state
    }

    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    /// Handle to the busy flag, for UI code that renders a send control.
    pub fn busy(&self) -> BusyFlag {
        self.busy.clone()
    }

    pub async fn dispatch(&mut self, question: &str) -> DispatchOutcome {
        if question.trim().is_empty() {
            return DispatchOutcome::Ignored;
        }

        // User message lands before the request is issued.
        self.store.append(MessageDraft::user(question));
        self.state = RequestState::Pending;
        let _guard = BusyGuard::engage(&self.busy);

        match self.backend.query(question).await {
            Ok(reply) => {
                debug!(rows = reply.rows.len(), has_dax = reply.dax_query.is_some(), "query answered");
                self.store.append(
                    MessageDraft::assistant(reply.response)
                        .with_dax(reply.dax_query)
                        .with_rows(reply.rows),
                );
            }
            Err(err) => {
                error!(error = %err, "query dispatch failed");
                self.store.append(MessageDraft::assistant(FALLBACK_TEXT));
            }
        }

        self.state = RequestState::Settled;
        DispatchOutcome::Completed
    }
}
