pub mod directory;
pub mod models;
pub mod presence;
pub mod roster;
pub mod store;
pub mod thread;

pub use directory::Directory;
pub use models::{
    Contact, ContactId, Conversation, ConversationId, ConversationKind, Member, MemberId, Message,
    Role, Sender,
};
pub use presence::{PresenceSource, StaticPresence};
pub use store::ChatStore;
