use crate::chat::models::{ContactId, ConversationId, MemberId, Role};

/// Everything the view can ask the session to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    // selection
    Select(ConversationId),
    Search(String),
    // composition
    SendMessage(String),
    NewChat,
    OpenCreateGroup,
    CreateGroup { name: String, members: Vec<ContactId> },
    ContactAccess(PermissionResponse),
    OpenMembers,
    AddMember(ContactId),
    RemoveMember(MemberId),
    SetRole(MemberId, Role),
    CloseDialog,
    // navigation
    OpenSettings(SettingsTab),
    CloseSettings,
    SetDarkMode(bool),
    SetSoundNotifications(bool),
    SetNotifications(bool),
    SignIn,
    Logout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionResponse {
    Allow,
    Always,
    Deny,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SettingsTab {
    #[default]
    Profile,
    Settings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastVariant {
    Default,
    Destructive,
}

/// A transient notification queued for the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
}

impl Toast {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: ToastVariant::Default,
        }
    }

    pub fn error(description: impl Into<String>) -> Self {
        Self {
            title: "Error".into(),
            description: description.into(),
            variant: ToastVariant::Destructive,
        }
    }

    pub fn text(&self) -> String {
        format!("{}: {}", self.title, self.description)
    }
}
