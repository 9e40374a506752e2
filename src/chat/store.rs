use chrono::Utc;

use crate::chat::message::{Message, MessageDraft, MessageId};

/// Append-only, insertion-ordered message list for one conversation.
///
/// The store owns the id counter: ids are assigned here, strictly
/// increasing, and never reused. Append is the only mutation.
#[derive(Debug)]
pub struct ConversationStore {
    messages: Vec<Message>,
    next_id: u64,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            next_id: 1,
        }
    }

    pub fn append(&mut self, draft: MessageDraft) -> MessageId {
        let id = MessageId(self.next_id);
        self.next_id += 1;
        self.messages.push(Message {
            id,
            text: draft.text,
            sender: draft.sender,
            timestamp: Utc::now(),
            dax_query: draft.dax_query,
            data: draft.data,
        });
        id
    }

    pub fn snapshot(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
