use std::collections::HashSet;

use crate::chat::models::ContactId;

/// Supplies the online flag for a contact when a roster seat is created.
///
/// Nothing in the prototype observes live connections, so implementations are
/// snapshots handed in by whoever builds the store.
pub trait PresenceSource {
    fn is_online(&self, contact: &ContactId) -> bool;
}

/// Presence backed by a fixed set of online contacts.
#[derive(Debug, Clone, Default)]
pub struct StaticPresence {
    online: HashSet<ContactId>,
}

impl StaticPresence {
    pub fn new<I>(online: I) -> Self
    where
        I: IntoIterator<Item = ContactId>,
    {
        Self {
            online: online.into_iter().collect(),
        }
    }

    pub fn set_online(&mut self, contact: ContactId, online: bool) {
        if online {
            self.online.insert(contact);
        } else {
            self.online.remove(&contact);
        }
    }
}

impl PresenceSource for StaticPresence {
    fn is_online(&self, contact: &ContactId) -> bool {
        self.online.contains(contact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_presence_tracks_toggles() {
        let mut presence = StaticPresence::new([ContactId::from("1")]);
        assert!(presence.is_online(&ContactId::from("1")));
        assert!(!presence.is_online(&ContactId::from("2")));

        presence.set_online(ContactId::from("2"), true);
        presence.set_online(ContactId::from("1"), false);
        assert!(!presence.is_online(&ContactId::from("1")));
        assert!(presence.is_online(&ContactId::from("2")));
    }
}
