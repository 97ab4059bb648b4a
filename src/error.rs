use thiserror::Error;

use crate::chat::models::{ContactId, ConversationId, MemberId};

/// Rejections raised by the conversation store. The display text is what the
/// user sees in the toast.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    #[error("Please enter a group name")]
    EmptyGroupName,
    #[error("Please select at least one member")]
    NoMembersSelected,
    #[error("Please type a message")]
    EmptyMessage,
    #[error("Unknown conversation {0}")]
    UnknownConversation(ConversationId),
    #[error("Unknown contact {0}")]
    UnknownContact(ContactId),
    #[error("{0} is not a group")]
    NotAGroup(ConversationId),
    #[error("Only group admins can manage members")]
    NotAdmin,
    #[error("{0} is not a member of this group")]
    UnknownMember(MemberId),
    #[error("{0} is already in this group")]
    AlreadyMember(MemberId),
    #[error("A group needs at least one admin")]
    LastAdmin,
    #[error("Admins cannot change their own role")]
    OwnRole,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No config dir")]
    NoConfigDir,
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid legacy config: {0}")]
    Json(#[from] serde_json::Error),
}
