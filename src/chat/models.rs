use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }
    };
}

string_id!(ConversationId);
string_id!(ContactId);
string_id!(MemberId);

// A roster seat is keyed by the contact it was created from.
impl From<&ContactId> for MemberId {
    fn from(id: &ContactId) -> Self {
        Self(id.0.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub phone: String,
}

impl Contact {
    /// Label used by the "Add Members" checklist.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.phone)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Member,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Member => "Member",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub avatar: String,
    pub online: bool,
    pub role: Role,
}

impl Member {
    pub fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }
}

/// Direct chats carry the peer's presence; groups carry their roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ConversationKind {
    Direct { online: bool },
    Group { roster: Vec<Member> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: ConversationId,
    pub name: String,
    pub avatar: String,
    pub last_message: String,
    pub timestamp: String,
    pub unread: u32,
    pub kind: ConversationKind,
}

impl Conversation {
    pub fn is_group(&self) -> bool {
        matches!(self.kind, ConversationKind::Group { .. })
    }

    pub fn roster(&self) -> Option<&[Member]> {
        match &self.kind {
            ConversationKind::Group { roster } => Some(roster),
            ConversationKind::Direct { .. } => None,
        }
    }

    /// Whether the presence dot is shown. Groups never show one.
    pub fn shows_online(&self) -> bool {
        matches!(self.kind, ConversationKind::Direct { online: true })
    }

    /// Header subtitle: presence for direct chats, roster summary for groups.
    pub fn status_line(&self) -> String {
        match &self.kind {
            ConversationKind::Direct { online: true } => "online".to_string(),
            ConversationKind::Direct { online: false } => "offline".to_string(),
            ConversationKind::Group { roster } => roster_summary(roster),
        }
    }
}

pub fn roster_summary(roster: &[Member]) -> String {
    let online = roster.iter().filter(|m| m.online).count();
    format!("{} members, {} online", roster.len(), online)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    #[serde(rename = "self")]
    Me,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    pub sender: Sender,
    pub content: String,
    pub timestamp: String,
}

impl Message {
    pub fn is_mine(&self) -> bool {
        matches!(self.sender, Sender::Me)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: &str, online: bool, role: Role) -> Member {
        Member {
            id: MemberId::from(id),
            name: id.to_string(),
            avatar: String::new(),
            online,
            role,
        }
    }

    #[test]
    fn status_line_reports_presence_or_roster() {
        let mut conv = Conversation {
            id: ConversationId::from("1"),
            name: "John Doe".into(),
            avatar: String::new(),
            last_message: String::new(),
            timestamp: String::new(),
            unread: 0,
            kind: ConversationKind::Direct { online: true },
        };
        assert_eq!(conv.status_line(), "online");
        assert!(conv.shows_online());

        conv.kind = ConversationKind::Group {
            roster: vec![
                member("1", true, Role::Admin),
                member("2", false, Role::Member),
                member("3", true, Role::Member),
            ],
        };
        assert_eq!(conv.status_line(), "3 members, 2 online");
        assert!(!conv.shows_online());
        assert!(conv.is_group());
    }

    #[test]
    fn sender_serializes_as_self_and_other() {
        let json = serde_json::to_string(&Sender::Me).unwrap();
        assert_eq!(json, "\"self\"");
        let json = serde_json::to_string(&Sender::Other).unwrap();
        assert_eq!(json, "\"other\"");
    }
}
