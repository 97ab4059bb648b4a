use log::{debug, warn};
use std::collections::HashMap;

use crate::chat::directory::Directory;
use crate::chat::models::{
    ContactId, Conversation, ConversationId, ConversationKind, Member, MemberId, Message, Role,
    Sender,
};
use crate::chat::presence::{PresenceSource, StaticPresence};
use crate::error::ChatError;

/// Owns every conversation, thread and roster of the running session.
pub struct ChatStore {
    pub(crate) conversations: Vec<Conversation>,
    pub(crate) threads: HashMap<ConversationId, Vec<Message>>,
    /// The roster seat the local user occupies in each group.
    pub(crate) seats: HashMap<ConversationId, MemberId>,
    pub(crate) directory: Directory,
    pub(crate) presence: Box<dyn PresenceSource>,
    pub(crate) next_message_id: u64,
    next_group_seq: u64,
}

impl std::fmt::Debug for ChatStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatStore")
            .field("conversations", &self.conversations.len())
            .field("threads", &self.threads.len())
            .field("next_message_id", &self.next_message_id)
            .finish_non_exhaustive()
    }
}

impl ChatStore {
    /// An empty store. Nothing is listed until groups are created.
    pub fn new(directory: Directory, presence: Box<dyn PresenceSource>) -> Self {
        Self {
            conversations: Vec::new(),
            threads: HashMap::new(),
            seats: HashMap::new(),
            directory,
            presence,
            next_message_id: 1,
            next_group_seq: 1,
        }
    }

    /// The demo data the prototype starts with: four direct chats, each
    /// opening on the same sample thread.
    pub fn with_seed_data(directory: Directory, presence: Box<dyn PresenceSource>) -> Self {
        let mut store = Self::new(directory, presence);
        let seeds = [
            ("1", "John Doe", "Hey! How are you doing?", "2m ago", 2, true),
            ("2", "Sarah Smith", "Thanks for the help!", "1h ago", 0, true),
            ("3", "Mike Johnson", "See you tomorrow 👋", "3h ago", 0, false),
            ("4", "Emily Davis", "That sounds great!", "1d ago", 1, false),
        ];
        for (id, name, last, ts, unread, online) in seeds {
            let id = ConversationId::from(id);
            let thread = store.sample_thread();
            store.threads.insert(id.clone(), thread);
            store.conversations.push(Conversation {
                id,
                name: name.to_string(),
                avatar: String::new(),
                last_message: last.to_string(),
                timestamp: ts.to_string(),
                unread,
                kind: ConversationKind::Direct { online },
            });
        }
        store
    }

    fn sample_thread(&mut self) -> Vec<Message> {
        [
            (Sender::Other, "Hey! How are you?", "10:30 AM"),
            (Sender::Me, "I'm good! How about you?", "10:31 AM"),
            (Sender::Other, "Doing great! Working on that new project", "10:32 AM"),
            (Sender::Me, "That's awesome! Let me know if you need any help", "10:33 AM"),
        ]
        .into_iter()
        .map(|(sender, content, timestamp)| Message {
            id: self.bump_message_id(),
            sender,
            content: content.to_string(),
            timestamp: timestamp.to_string(),
        })
        .collect()
    }

    pub(crate) fn bump_message_id(&mut self) -> u64 {
        let id = self.next_message_id;
        self.next_message_id += 1;
        id
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn get(&self, id: &ConversationId) -> Option<&Conversation> {
        self.conversations.iter().find(|c| &c.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: &ConversationId) -> Result<&mut Conversation, ChatError> {
        self.conversations
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| ChatError::UnknownConversation(id.clone()))
    }

    /// Conversations in list order whose name contains `filter`, ignoring case.
    pub fn list_conversations(&self, filter: &str) -> Vec<&Conversation> {
        let needle = filter.to_lowercase();
        self.conversations
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }

    /// Validates the request, builds the roster from the directory and puts the
    /// new group at the top of the list. The first selected contact becomes the
    /// admin and holds the local user's seat.
    pub fn create_group(
        &mut self,
        name: &str,
        member_ids: &[ContactId],
    ) -> Result<Conversation, ChatError> {
        let name = name.trim();
        if name.is_empty() {
            warn!("create_group rejected: empty name");
            return Err(ChatError::EmptyGroupName);
        }
        if member_ids.is_empty() {
            warn!("create_group rejected: no members for {name}");
            return Err(ChatError::NoMembersSelected);
        }

        let mut roster: Vec<Member> = Vec::with_capacity(member_ids.len());
        for contact_id in member_ids {
            let member_id = MemberId::from(contact_id);
            if roster.iter().any(|m| m.id == member_id) {
                continue;
            }
            let contact = self
                .directory
                .get(contact_id)
                .ok_or_else(|| ChatError::UnknownContact(contact_id.clone()))?;
            let role = if roster.is_empty() { Role::Admin } else { Role::Member };
            roster.push(Member {
                id: member_id,
                name: contact.name.clone(),
                avatar: String::new(),
                online: self.presence.is_online(contact_id),
                role,
            });
        }

        let id = ConversationId::new(format!("group-{}", self.next_group_seq));
        self.next_group_seq += 1;
        let seat = roster[0].id.clone();
        let group = Conversation {
            id: id.clone(),
            name: name.to_string(),
            avatar: String::new(),
            last_message: "Group created".to_string(),
            timestamp: "now".to_string(),
            unread: 0,
            kind: ConversationKind::Group { roster },
        };
        debug!("created group {id} ({name}) seat={seat}");
        self.threads.insert(id.clone(), Vec::new());
        self.seats.insert(id, seat);
        self.conversations.insert(0, group.clone());
        Ok(group)
    }

    /// Clears the unread badge of a conversation.
    pub fn mark_read(&mut self, id: &ConversationId) -> Result<(), ChatError> {
        let conv = self.get_mut(id)?;
        if conv.unread > 0 {
            debug!("marking {id} read ({} unread)", conv.unread);
            conv.unread = 0;
        }
        Ok(())
    }

    /// The roster seat the local user holds in a group.
    pub fn seat(&self, id: &ConversationId) -> Option<&MemberId> {
        self.seats.get(id)
    }
}

impl Default for ChatStore {
    fn default() -> Self {
        Self::with_seed_data(
            Directory::default(),
            Box::new(StaticPresence::new([ContactId::from("1"), ContactId::from("3")])),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[&str]) -> Vec<ContactId> {
        raw.iter().map(|s| ContactId::from(*s)).collect()
    }

    #[test]
    fn seed_data_lists_four_direct_chats() {
        let store = ChatStore::default();
        let names: Vec<_> = store.list_conversations("").iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["John Doe", "Sarah Smith", "Mike Johnson", "Emily Davis"]);
        assert!(store.list_conversations("").iter().all(|c| !c.is_group()));
        assert_eq!(store.get(&ConversationId::from("1")).unwrap().unread, 2);
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let store = ChatStore::default();
        let hits = store.list_conversations("SMI");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Sarah Smith");

        let hits = store.list_conversations("o");
        assert!(hits.iter().all(|c| c.name.to_lowercase().contains('o')));
        assert_eq!(hits.len(), 2);

        assert!(store.list_conversations("zzz").is_empty());
    }

    #[test]
    fn empty_group_name_is_rejected() {
        let mut store = ChatStore::default();
        let before = store.len();
        assert_eq!(store.create_group("   ", &ids(&["1"])), Err(ChatError::EmptyGroupName));
        assert_eq!(store.len(), before);
    }

    #[test]
    fn empty_selection_is_rejected() {
        let mut store = ChatStore::default();
        assert_eq!(store.create_group("Team", &[]), Err(ChatError::NoMembersSelected));
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn unknown_contact_is_rejected_without_side_effects() {
        let mut store = ChatStore::default();
        let err = store.create_group("Team", &ids(&["1", "42"])).unwrap_err();
        assert_eq!(err, ChatError::UnknownContact(ContactId::from("42")));
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn created_group_is_prepended_with_roster() {
        let mut store = ChatStore::default();
        let group = store.create_group("Weekend Trip", &ids(&["2", "1", "3"])).unwrap();

        assert_eq!(store.len(), 5);
        let first = store.list_conversations("")[0];
        assert_eq!(first.id, group.id);
        assert!(first.is_group());
        assert_eq!(first.last_message, "Group created");
        assert_eq!(first.timestamp, "now");
        assert_eq!(first.unread, 0);

        let roster = first.roster().unwrap();
        assert_eq!(roster.len(), 3);
        assert_eq!(roster[0].name, "Priya Sharma");
        assert_eq!(roster[0].role, Role::Admin);
        assert!(roster[1..].iter().all(|m| m.role == Role::Member));
        // presence comes from the injected source: 1 and 3 are online
        assert!(!roster[0].online);
        assert!(roster[1].online && roster[2].online);

        assert_eq!(store.seat(&group.id), Some(&MemberId::from("2")));
    }

    #[test]
    fn duplicate_names_are_allowed() {
        let mut store = ChatStore::default();
        let a = store.create_group("Team", &ids(&["1"])).unwrap();
        let b = store.create_group("Team", &ids(&["2"])).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(store.list_conversations("team").len(), 2);
    }

    #[test]
    fn mark_read_clears_badge() {
        let mut store = ChatStore::default();
        let id = ConversationId::from("1");
        store.mark_read(&id).unwrap();
        assert_eq!(store.get(&id).unwrap().unread, 0);
        assert_eq!(
            store.mark_read(&ConversationId::from("nope")),
            Err(ChatError::UnknownConversation(ConversationId::from("nope")))
        );
    }
}
