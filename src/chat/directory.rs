use once_cell::sync::Lazy;

use crate::chat::models::{Contact, ContactId};

static CONTACTS: Lazy<Vec<Contact>> = Lazy::new(|| {
    [
        ("1", "John Doe", "+91 98765 43210"),
        ("2", "Priya Sharma", "+91 98765 43211"),
        ("3", "Alex Johnson", "+91 98765 43212"),
        ("4", "Maria Garcia", "+91 98765 43213"),
    ]
    .into_iter()
    .map(|(id, name, phone)| Contact {
        id: ContactId::from(id),
        name: name.to_string(),
        phone: phone.to_string(),
    })
    .collect()
});

/// Read-only pool of people that can be added to groups.
#[derive(Debug, Clone)]
pub struct Directory {
    contacts: Vec<Contact>,
}

impl Directory {
    pub fn new(contacts: Vec<Contact>) -> Self {
        Self { contacts }
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn get(&self, id: &ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|c| &c.id == id)
    }
}

impl Default for Directory {
    fn default() -> Self {
        Self::new(CONTACTS.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_directory_has_seed_contacts() {
        let dir = Directory::default();
        assert_eq!(dir.contacts().len(), 4);
        let priya = dir.get(&ContactId::from("2")).unwrap();
        assert_eq!(priya.name, "Priya Sharma");
        assert_eq!(priya.label(), "Priya Sharma (+91 98765 43211)");
        assert!(dir.get(&ContactId::from("9")).is_none());
    }
}
