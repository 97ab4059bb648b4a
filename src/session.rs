use log::{debug, info, warn};

use crate::app::{AppConfig, Preferences, Profile};
use crate::chat::models::{ContactId, Conversation, ConversationId, Member, MemberId, Message, Role};
use crate::chat::store::ChatStore;
use crate::error::ChatError;
use crate::events::{Intent, PermissionResponse, SettingsTab, Toast};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Landing,
    Chats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialog {
    ContactPermission,
    CreateGroup,
    GroupMembers,
}

/// View state plus the store it drives. The front end holds the only handle
/// and funnels every user action through [`Session::dispatch`].
#[derive(Debug)]
pub struct Session {
    store: ChatStore,
    profile: Profile,
    preferences: Preferences,
    screen: Screen,
    selected: Option<ConversationId>,
    search: String,
    settings: Option<SettingsTab>,
    dialog: Option<Dialog>,
    contact_access: Option<PermissionResponse>,
    toasts: Vec<Toast>,
}

impl Session {
    pub fn new(config: AppConfig) -> Self {
        Self::with_store(config, ChatStore::default())
    }

    pub fn with_store(config: AppConfig, store: ChatStore) -> Self {
        Self {
            store,
            profile: config.profile,
            preferences: config.preferences,
            screen: Screen::Landing,
            selected: None,
            search: String::new(),
            settings: None,
            dialog: None,
            contact_access: None,
            toasts: Vec::new(),
        }
    }

    pub fn store(&self) -> &ChatStore {
        &self.store
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn preferences(&self) -> Preferences {
        self.preferences
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn dialog(&self) -> Option<Dialog> {
        self.dialog
    }

    /// `None` while the settings panel is hidden.
    pub fn settings_tab(&self) -> Option<SettingsTab> {
        self.settings
    }

    /// Sidebar rows for the current search text.
    pub fn visible_conversations(&self) -> Vec<&Conversation> {
        self.store.list_conversations(&self.search)
    }

    pub fn selected(&self) -> Option<&Conversation> {
        self.selected.as_ref().and_then(|id| self.store.get(id))
    }

    pub fn thread(&self) -> &[Message] {
        self.selected
            .as_ref()
            .and_then(|id| self.store.messages(id).ok())
            .unwrap_or_default()
    }

    /// The local user's seat in the selected group.
    pub fn my_seat(&self) -> Option<&Member> {
        let id = self.selected.as_ref()?;
        let seat = self.store.seat(id)?;
        self.store.roster(id).ok()?.iter().find(|m| &m.id == seat)
    }

    pub fn can_manage_members(&self) -> bool {
        self.my_seat().is_some_and(Member::is_admin)
    }

    /// Directory contacts not yet in the selected group.
    pub fn addable_contacts(&self) -> Vec<&crate::chat::models::Contact> {
        let roster = match self.selected.as_ref().map(|id| self.store.roster(id)) {
            Some(Ok(roster)) => roster,
            _ => return Vec::new(),
        };
        self.store
            .directory()
            .contacts()
            .iter()
            .filter(|c| !roster.iter().any(|m| m.id == MemberId::from(&c.id)))
            .collect()
    }

    /// Drains the queued notifications.
    pub fn take_toasts(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.toasts)
    }

    pub fn dispatch(&mut self, intent: Intent) {
        debug!("dispatch {intent:?}");
        match intent {
            Intent::Select(id) => self.select(id),
            Intent::Search(text) => self.search = text,
            Intent::SendMessage(text) => self.send_message(&text),
            Intent::NewChat => self.toasts.push(Toast::info(
                "New Chat",
                "Feature coming soon! Search for contacts above.",
            )),
            Intent::OpenCreateGroup => {
                self.dialog = if self.contact_access == Some(PermissionResponse::Always) {
                    Some(Dialog::CreateGroup)
                } else {
                    Some(Dialog::ContactPermission)
                };
            }
            Intent::ContactAccess(response) => self.contact_access(response),
            Intent::CreateGroup { name, members } => {
                if self.dialog == Some(Dialog::CreateGroup) {
                    self.create_group(&name, &members);
                } else {
                    debug!("create group {name:?} outside the dialog");
                }
            }
            Intent::OpenMembers => {
                if self.selected().is_some_and(Conversation::is_group) {
                    self.dialog = Some(Dialog::GroupMembers);
                }
            }
            Intent::AddMember(contact) => self.add_member(&contact),
            Intent::RemoveMember(member) => self.remove_member(&member),
            Intent::SetRole(member, role) => self.set_role(&member, role),
            Intent::CloseDialog => self.dialog = None,
            Intent::OpenSettings(tab) => {
                info!("settings panel: {tab:?}");
                self.settings = Some(tab);
            }
            Intent::CloseSettings => self.settings = None,
            Intent::SetDarkMode(on) => self.preferences.dark_mode = on,
            Intent::SetSoundNotifications(on) => self.preferences.sound_notifications = on,
            Intent::SetNotifications(on) => self.preferences.notifications = on,
            Intent::SignIn => {
                info!("entering chats as {}", self.profile.name);
                self.screen = Screen::Chats;
            }
            Intent::Logout => self.logout(),
        }
    }

    fn select(&mut self, id: ConversationId) {
        if let Err(e) = self.store.mark_read(&id) {
            warn!("select: {e}");
            return;
        }
        self.dialog = None;
        self.selected = Some(id);
    }

    fn send_message(&mut self, text: &str) {
        let Some(id) = self.selected.clone() else {
            warn!("send with no conversation selected");
            return;
        };
        if let Err(e) = self.store.append_message(&id, text) {
            self.toasts.push(Toast::error(e.to_string()));
        }
    }

    fn contact_access(&mut self, response: PermissionResponse) {
        if self.dialog != Some(Dialog::ContactPermission) {
            return;
        }
        self.contact_access = Some(response);
        match response {
            PermissionResponse::Allow | PermissionResponse::Always => {
                self.dialog = Some(Dialog::CreateGroup);
            }
            PermissionResponse::Deny => {
                self.dialog = None;
                self.toasts
                    .push(Toast::error("Contact access is needed to add group members"));
            }
        }
    }

    fn create_group(&mut self, name: &str, members: &[ContactId]) {
        match self.store.create_group(name, members) {
            Ok(group) => {
                let count = group.roster().map_or(0, <[Member]>::len);
                self.toasts.push(Toast::info(
                    "Group created!",
                    format!("{} created with {count} members", group.name),
                ));
                self.dialog = None;
            }
            Err(e) => self.toasts.push(Toast::error(e.to_string())),
        }
    }

    /// Runs a roster mutation on the selected group from the local user's seat.
    fn with_seat<T>(
        &mut self,
        op: impl FnOnce(&mut ChatStore, &ConversationId, &MemberId) -> Result<T, ChatError>,
    ) -> Option<T> {
        let id = self.selected.clone()?;
        let result = match self.store.seat(&id).cloned() {
            Some(seat) => op(&mut self.store, &id, &seat),
            None => Err(ChatError::NotAGroup(id)),
        };
        match result {
            Ok(v) => Some(v),
            Err(e) => {
                warn!("roster change refused: {e}");
                self.toasts.push(Toast::error(e.to_string()));
                None
            }
        }
    }

    fn add_member(&mut self, contact: &ContactId) {
        if let Some(member) = self.with_seat(|store, id, seat| store.add_member(id, seat, contact)) {
            self.toasts
                .push(Toast::info("Member added", format!("{} joined the group", member.name)));
        }
    }

    fn remove_member(&mut self, member: &MemberId) {
        if let Some(removed) =
            self.with_seat(|store, id, seat| store.remove_member(id, seat, member))
        {
            self.toasts
                .push(Toast::info("Member removed", format!("{} left the group", removed.name)));
        }
    }

    fn set_role(&mut self, member: &MemberId, role: Role) {
        self.with_seat(|store, id, seat| store.set_role(id, seat, member, role));
    }

    fn logout(&mut self) {
        info!("logging out {}", self.profile.name);
        self.toasts.push(Toast::info(
            "Logged out",
            "You have been successfully logged out",
        ));
        self.screen = Screen::Landing;
        self.selected = None;
        self.settings = None;
        self.dialog = None;
        self.search.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::ToastVariant;

    fn session() -> Session {
        let mut s = Session::new(AppConfig::default());
        s.dispatch(Intent::SignIn);
        s
    }

    fn open_group_dialog(s: &mut Session) {
        s.dispatch(Intent::OpenCreateGroup);
        s.dispatch(Intent::ContactAccess(PermissionResponse::Allow));
        assert_eq!(s.dialog(), Some(Dialog::CreateGroup));
    }

    #[test]
    fn selecting_clears_unread_and_shows_thread() {
        let mut s = session();
        s.dispatch(Intent::Select(ConversationId::from("1")));
        let conv = s.selected().unwrap();
        assert_eq!(conv.name, "John Doe");
        assert_eq!(conv.unread, 0);
        assert_eq!(s.thread().len(), 4);

        s.dispatch(Intent::Select(ConversationId::from("ghost")));
        assert_eq!(s.selected().unwrap().name, "John Doe");
    }

    #[test]
    fn new_chat_is_not_available_yet() {
        let mut s = session();
        s.dispatch(Intent::NewChat);
        let toasts = s.take_toasts();
        assert_eq!(toasts[0].title, "New Chat");
        assert_eq!(toasts[0].variant, ToastVariant::Default);
        assert_eq!(s.store().len(), 4);
    }

    #[test]
    fn search_narrows_sidebar() {
        let mut s = session();
        s.dispatch(Intent::Search("EMI".into()));
        let names: Vec<_> = s.visible_conversations().iter().map(|c| c.name.clone()).collect();
        assert_eq!(names, ["Emily Davis"]);
    }

    #[test]
    fn blank_send_is_rejected_with_toast() {
        let mut s = session();
        s.dispatch(Intent::Select(ConversationId::from("2")));
        s.dispatch(Intent::SendMessage("  ".into()));
        assert_eq!(s.thread().len(), 4);
        let toasts = s.take_toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].variant, ToastVariant::Destructive);
        assert_eq!(toasts[0].description, "Please type a message");

        s.dispatch(Intent::SendMessage("hello".into()));
        assert_eq!(s.thread().len(), 5);
        assert!(s.thread().last().unwrap().is_mine());
    }

    #[test]
    fn group_creation_toasts() {
        let mut s = session();
        open_group_dialog(&mut s);

        s.dispatch(Intent::CreateGroup { name: String::new(), members: vec![ContactId::from("1")] });
        let toasts = s.take_toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].variant, ToastVariant::Destructive);
        assert_eq!(toasts[0].description, "Please enter a group name");
        assert_eq!(s.dialog(), Some(Dialog::CreateGroup));

        s.dispatch(Intent::CreateGroup { name: "Team".into(), members: vec![] });
        assert_eq!(s.take_toasts()[0].description, "Please select at least one member");

        s.dispatch(Intent::CreateGroup {
            name: "Team".into(),
            members: vec![ContactId::from("1"), ContactId::from("4")],
        });
        let toasts = s.take_toasts();
        assert_eq!(toasts[0].title, "Group created!");
        assert_eq!(toasts[0].description, "Team created with 2 members");
        assert_eq!(s.dialog(), None);
        assert_eq!(s.visible_conversations()[0].name, "Team");
    }

    #[test]
    fn contact_permission_flow() {
        let mut s = session();
        s.dispatch(Intent::OpenCreateGroup);
        assert_eq!(s.dialog(), Some(Dialog::ContactPermission));
        s.dispatch(Intent::ContactAccess(PermissionResponse::Deny));
        assert_eq!(s.dialog(), None);
        assert_eq!(s.take_toasts()[0].variant, ToastVariant::Destructive);

        // a one-off allow asks again next time
        open_group_dialog(&mut s);
        s.dispatch(Intent::CloseDialog);
        s.dispatch(Intent::OpenCreateGroup);
        assert_eq!(s.dialog(), Some(Dialog::ContactPermission));

        s.dispatch(Intent::ContactAccess(PermissionResponse::Always));
        s.dispatch(Intent::CloseDialog);
        s.dispatch(Intent::OpenCreateGroup);
        assert_eq!(s.dialog(), Some(Dialog::CreateGroup));
    }

    #[test]
    fn create_group_needs_open_dialog() {
        let mut s = session();
        s.dispatch(Intent::OpenCreateGroup);
        s.dispatch(Intent::ContactAccess(PermissionResponse::Deny));
        s.take_toasts();

        s.dispatch(Intent::CreateGroup { name: "Team".into(), members: vec![ContactId::from("1")] });
        assert_eq!(s.store().len(), 4);
        assert!(s.take_toasts().is_empty());

        open_group_dialog(&mut s);
        s.dispatch(Intent::CloseDialog);
        s.dispatch(Intent::CreateGroup { name: "Team".into(), members: vec![ContactId::from("1")] });
        assert_eq!(s.store().len(), 4);
    }

    #[test]
    fn members_dialog_only_for_groups() {
        let mut s = session();
        s.dispatch(Intent::Select(ConversationId::from("1")));
        s.dispatch(Intent::OpenMembers);
        assert_eq!(s.dialog(), None);

        open_group_dialog(&mut s);
        s.dispatch(Intent::CreateGroup { name: "Team".into(), members: vec![ContactId::from("3")] });
        let id = s.visible_conversations()[0].id.clone();
        s.dispatch(Intent::Select(id));
        s.dispatch(Intent::OpenMembers);
        assert_eq!(s.dialog(), Some(Dialog::GroupMembers));
        assert!(s.can_manage_members());
        assert_eq!(s.my_seat().unwrap().name, "Alex Johnson");
    }

    #[test]
    fn roster_intents_act_from_local_seat() {
        let mut s = session();
        open_group_dialog(&mut s);
        s.dispatch(Intent::CreateGroup { name: "Team".into(), members: vec![ContactId::from("1")] });
        let id = s.visible_conversations()[0].id.clone();
        s.dispatch(Intent::Select(id.clone()));
        s.take_toasts();

        let addable: Vec<_> = s.addable_contacts().iter().map(|c| c.id.clone()).collect();
        assert_eq!(addable.len(), 3);

        s.dispatch(Intent::AddMember(ContactId::from("2")));
        assert_eq!(s.take_toasts()[0].description, "Priya Sharma joined the group");
        assert_eq!(s.store().roster(&id).unwrap().len(), 2);

        s.dispatch(Intent::RemoveMember(MemberId::from("1")));
        assert_eq!(s.take_toasts()[0].description, "A group needs at least one admin");

        s.dispatch(Intent::SetRole(MemberId::from("2"), Role::Admin));
        s.dispatch(Intent::RemoveMember(MemberId::from("2")));
        assert_eq!(s.take_toasts()[0].title, "Member removed");
        assert_eq!(s.store().roster(&id).unwrap().len(), 1);
    }

    #[test]
    fn roster_intents_on_direct_chat_are_refused() {
        let mut s = session();
        s.dispatch(Intent::Select(ConversationId::from("2")));
        s.dispatch(Intent::RemoveMember(MemberId::from("2")));
        let toasts = s.take_toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].variant, ToastVariant::Destructive);
    }

    #[test]
    fn settings_and_logout() {
        let mut s = session();
        assert_eq!(s.settings_tab(), None);
        s.dispatch(Intent::OpenSettings(SettingsTab::Settings));
        assert_eq!(s.settings_tab(), Some(SettingsTab::Settings));
        s.dispatch(Intent::SetDarkMode(true));
        s.dispatch(Intent::SetSoundNotifications(false));
        assert!(s.preferences().dark_mode);
        assert!(!s.preferences().sound_notifications);

        s.dispatch(Intent::Select(ConversationId::from("3")));
        s.dispatch(Intent::Logout);
        let toasts = s.take_toasts();
        assert_eq!(toasts[0].text(), "Logged out: You have been successfully logged out");
        assert_eq!(s.screen(), Screen::Landing);
        assert!(s.selected().is_none());
        assert_eq!(s.settings_tab(), None);
    }
}
