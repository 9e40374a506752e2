use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// One result row: column name -> scalar value, in wire order.
pub type Row = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

impl Sender {
    pub fn label(self) -> &'static str {
        match self {
            Sender::User => "You",
            Sender::Assistant => "Assistant",
        }
    }
}

/// A conversation entry. Immutable once appended to the store.
#[derive(Debug, Clone)]
pub struct Message {
    pub id: MessageId,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    /// Generated DAX, only present on assistant messages that returned one.
    pub dax_query: Option<String>,
    pub data: Vec<Row>,
}

/// Everything a message carries except its id and timestamp, which the
/// store assigns at append time.
#[derive(Debug, Clone)]
pub struct MessageDraft {
    pub text: String,
    pub sender: Sender,
    pub dax_query: Option<String>,
    pub data: Vec<Row>,
}

impl MessageDraft {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
            dax_query: None,
            data: Vec::new(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Assistant,
            dax_query: None,
            data: Vec::new(),
        }
    }

    pub fn with_dax(mut self, dax_query: Option<String>) -> Self {
        self.dax_query = dax_query;
        self
    }

    pub fn with_rows(mut self, data: Vec<Row>) -> Self {
        self.data = data;
        self
    }
}
