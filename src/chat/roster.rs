use log::{debug, warn};

use crate::chat::models::{ContactId, ConversationId, ConversationKind, Member, MemberId, Role};
use crate::chat::store::ChatStore;
use crate::error::ChatError;

fn require_admin(roster: &[Member], acting: &MemberId) -> Result<(), ChatError> {
    if roster.iter().any(|m| &m.id == acting && m.is_admin()) {
        Ok(())
    } else {
        warn!("{acting} is not an admin of this group");
        Err(ChatError::NotAdmin)
    }
}

fn admin_count(roster: &[Member]) -> usize {
    roster.iter().filter(|m| m.is_admin()).count()
}

impl ChatStore {
    /// Group roster in insertion order.
    pub fn roster(&self, id: &ConversationId) -> Result<&[Member], ChatError> {
        let conv = self
            .get(id)
            .ok_or_else(|| ChatError::UnknownConversation(id.clone()))?;
        conv.roster().ok_or_else(|| ChatError::NotAGroup(id.clone()))
    }

    fn roster_mut(&mut self, id: &ConversationId) -> Result<&mut Vec<Member>, ChatError> {
        match &mut self.get_mut(id)?.kind {
            ConversationKind::Group { roster } => Ok(roster),
            ConversationKind::Direct { .. } => Err(ChatError::NotAGroup(id.clone())),
        }
    }

    /// Adds a directory contact to a group as a plain member.
    pub fn add_member(
        &mut self,
        id: &ConversationId,
        acting: &MemberId,
        contact_id: &ContactId,
    ) -> Result<Member, ChatError> {
        let member_id = MemberId::from(contact_id);
        {
            let roster = self.roster(id)?;
            require_admin(roster, acting)?;
            if roster.iter().any(|m| m.id == member_id) {
                return Err(ChatError::AlreadyMember(member_id));
            }
        }
        let contact = self
            .directory
            .get(contact_id)
            .ok_or_else(|| ChatError::UnknownContact(contact_id.clone()))?;
        let member = Member {
            id: member_id,
            name: contact.name.clone(),
            avatar: String::new(),
            online: self.presence.is_online(contact_id),
            role: Role::Member,
        };
        debug!("{acting} added {} to {id}", member.id);
        self.roster_mut(id)?.push(member.clone());
        Ok(member)
    }

    /// Removes a member. Unknown members and the last admin are refused.
    pub fn remove_member(
        &mut self,
        id: &ConversationId,
        acting: &MemberId,
        member_id: &MemberId,
    ) -> Result<Member, ChatError> {
        let roster = self.roster_mut(id)?;
        require_admin(roster, acting)?;
        let pos = roster
            .iter()
            .position(|m| &m.id == member_id)
            .ok_or_else(|| ChatError::UnknownMember(member_id.clone()))?;
        if roster[pos].is_admin() && admin_count(roster) == 1 {
            return Err(ChatError::LastAdmin);
        }
        let removed = roster.remove(pos);
        debug!("{acting} removed {member_id} from {id}");
        Ok(removed)
    }

    /// Changes another member's role. Admins cannot change their own role, so
    /// a group never loses its last admin this way.
    pub fn set_role(
        &mut self,
        id: &ConversationId,
        acting: &MemberId,
        member_id: &MemberId,
        role: Role,
    ) -> Result<(), ChatError> {
        let roster = self.roster_mut(id)?;
        require_admin(roster, acting)?;
        if acting == member_id {
            return Err(ChatError::OwnRole);
        }
        let member = roster
            .iter_mut()
            .find(|m| &m.id == member_id)
            .ok_or_else(|| ChatError::UnknownMember(member_id.clone()))?;
        member.role = role;
        debug!("{acting} set {member_id} to {} in {id}", role.label());
        Ok(())
    }
}
