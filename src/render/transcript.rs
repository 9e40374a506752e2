use console::style;

use crate::chat::message::{Message, Sender};
use crate::render::table;

/// Render one message: sender label and text, then the DAX block and the
/// result table when present. Pure with respect to the store snapshot.
pub fn render_message(msg: &Message) -> String {
    let label = match msg.sender {
        Sender::User => style(msg.sender.label()).bold().cyan(),
        Sender::Assistant => style(msg.sender.label()).bold().green(),
    };
    let mut out = format!("{}: {}", label, msg.text);

    if let Some(dax) = &msg.dax_query {
        out.push('\n');
        out.push_str(&style(dax.trim_end()).dim().to_string());
    }

    if let Some(tbl) = table::project(&msg.data) {
        out.push('\n');
        out.push_str(tbl.to_display().trim_end());
    }

    out
}

pub fn render(messages: &[Message]) -> String {
    messages
        .iter()
        .map(render_message)
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::message::{MessageDraft, Row};
    use crate::chat::store::ConversationStore;

    fn rows(json: &str) -> Vec<Row> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn assistant_message_shows_dax_and_table() {
        let mut store = ConversationStore::new();
        store.append(
            MessageDraft::assistant("Top 2 cities")
                .with_dax(Some("EVALUATE TOPN(2, ...)".into()))
                .with_rows(rows(r#"[{"City":"Oslo","Sales":10}]"#)),
        );
        let out = render(store.snapshot());
        assert!(out.contains("Top 2 cities"));
        assert!(out.contains("EVALUATE TOPN(2, ...)"));
        assert!(out.contains("City"));
        assert!(out.contains("Oslo"));
    }

    #[test]
    fn message_without_rows_renders_no_table() {
        let mut store = ConversationStore::new();
        store.append(MessageDraft::assistant("Query completed"));
        let out = render(store.snapshot());
        assert_eq!(out.lines().count(), 1);
    }

    #[test]
    fn turns_are_separated_and_ordered() {
        let mut store = ConversationStore::new();
        store.append(MessageDraft::user("show sales"));
        store.append(MessageDraft::assistant("here"));
        let out = render(store.snapshot());
        let user_at = out.find("show sales").unwrap();
        let assistant_at = out.find("here").unwrap();
        assert!(user_at < assistant_at);
    }
}
