use chrono::Local;
use log::debug;

use crate::chat::models::{ConversationId, Message, Sender};
use crate::chat::store::ChatStore;
use crate::error::ChatError;
use crate::utils::clock_label;

impl ChatStore {
    /// Messages of a conversation in append order.
    pub fn messages(&self, id: &ConversationId) -> Result<&[Message], ChatError> {
        self.threads
            .get(id)
            .map(Vec::as_slice)
            .ok_or_else(|| ChatError::UnknownConversation(id.clone()))
    }

    /// Appends a message from the local user. Blank text leaves the thread
    /// untouched.
    pub fn append_message(&mut self, id: &ConversationId, text: &str) -> Result<Message, ChatError> {
        if text.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        if !self.threads.contains_key(id) {
            return Err(ChatError::UnknownConversation(id.clone()));
        }

        let message = Message {
            id: self.bump_message_id(),
            sender: Sender::Me,
            content: text.to_string(),
            timestamp: clock_label(&Local::now()),
        };

        let conv = self.get_mut(id)?;
        conv.last_message = message.content.clone();
        conv.timestamp = "now".to_string();

        debug!("appended message {} to {id}", message.id);
        self.threads
            .entry(id.clone())
            .or_default()
            .push(message.clone());
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_adds_self_message_and_updates_preview() {
        let mut store = ChatStore::default();
        let id = ConversationId::from("2");
        let before = store.messages(&id).unwrap().len();

        let sent = store.append_message(&id, "hello").unwrap();

        let thread = store.messages(&id).unwrap();
        assert_eq!(thread.len(), before + 1);
        let last = thread.last().unwrap();
        assert_eq!(last, &sent);
        assert_eq!(last.sender, Sender::Me);
        assert_eq!(last.content, "hello");
        assert!(!last.timestamp.is_empty());

        let conv = store.get(&id).unwrap();
        assert_eq!(conv.last_message, "hello");
        assert_eq!(conv.timestamp, "now");
    }

    #[test]
    fn blank_text_is_a_noop() {
        let mut store = ChatStore::default();
        let id = ConversationId::from("1");
        let before = store.messages(&id).unwrap().len();
        for text in ["", "   ", "\n\t"] {
            assert_eq!(store.append_message(&id, text), Err(ChatError::EmptyMessage));
        }
        assert_eq!(store.messages(&id).unwrap().len(), before);
        assert_eq!(store.get(&id).unwrap().last_message, "Hey! How are you doing?");
    }

    #[test]
    fn ids_increase_across_conversations() {
        let mut store = ChatStore::default();
        let a = store.append_message(&ConversationId::from("1"), "one").unwrap();
        let b = store.append_message(&ConversationId::from("3"), "two").unwrap();
        let c = store.append_message(&ConversationId::from("1"), "three").unwrap();
        assert!(a.id < b.id && b.id < c.id);
        let seeded_max = store.messages(&ConversationId::from("4")).unwrap().iter().map(|m| m.id).max();
        assert!(seeded_max.unwrap() < a.id);
    }

    #[test]
    fn unknown_conversation_is_rejected() {
        let mut store = ChatStore::default();
        let id = ConversationId::from("missing");
        assert_eq!(
            store.append_message(&id, "hi"),
            Err(ChatError::UnknownConversation(id.clone()))
        );
        assert!(store.messages(&id).is_err());
    }
}
