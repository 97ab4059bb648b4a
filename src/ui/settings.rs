use gtk4 as gtk;
use gtk4::prelude::*;

use crate::events::{Intent, SettingsTab};
use crate::session::Session;
use crate::ui::Dispatch;

const PROFILE_PAGE: &str = "profile";
const SETTINGS_PAGE: &str = "settings";

pub struct SettingsPanel {
    root: gtk::Box,
    stack: gtk::Stack,
}

impl SettingsPanel {
    pub fn new(session: &Session, dispatch: Dispatch) -> Self {
        let root = gtk::Box::new(gtk::Orientation::Vertical, 8);
        root.set_width_request(320);
        root.set_margin_top(8);
        root.set_margin_bottom(8);
        root.set_margin_start(8);
        root.set_margin_end(8);

        let header = gtk::Box::new(gtk::Orientation::Horizontal, 6);
        let title = gtk::Label::new(Some("Profile & Settings"));
        title.add_css_class("title-4");
        title.set_hexpand(true);
        title.set_halign(gtk::Align::Start);
        let close = gtk::Button::from_icon_name("window-close-symbolic");
        close.add_css_class("flat");
        {
            let dispatch = dispatch.clone();
            close.connect_clicked(move |_| dispatch(Intent::CloseSettings));
        }
        header.append(&title);
        header.append(&close);
        root.append(&header);

        let stack = gtk::Stack::new();
        stack.set_vexpand(true);
        stack.add_titled(&profile_page(session), Some(PROFILE_PAGE), "Profile");
        stack.add_titled(&settings_page(session, &dispatch), Some(SETTINGS_PAGE), "Settings");

        let switcher = gtk::StackSwitcher::new();
        switcher.set_stack(Some(&stack));
        switcher.set_halign(gtk::Align::Center);
        root.append(&switcher);
        root.append(&stack);

        {
            let dispatch = dispatch.clone();
            stack.connect_visible_child_name_notify(move |stack| {
                let tab = match stack.visible_child_name().as_deref() {
                    Some(SETTINGS_PAGE) => SettingsTab::Settings,
                    _ => SettingsTab::Profile,
                };
                dispatch(Intent::OpenSettings(tab));
            });
        }

        Self { root, stack }
    }

    pub fn widget(&self) -> gtk::Widget {
        self.root.clone().upcast()
    }

    pub fn show_tab(&self, tab: SettingsTab) {
        let name = match tab {
            SettingsTab::Profile => PROFILE_PAGE,
            SettingsTab::Settings => SETTINGS_PAGE,
        };
        if self.stack.visible_child_name().as_deref() != Some(name) {
            self.stack.set_visible_child_name(name);
        }
    }
}

fn profile_page(session: &Session) -> gtk::Box {
    let profile = session.profile();
    let page = gtk::Box::new(gtk::Orientation::Vertical, 10);
    page.set_margin_top(12);

    let avatar = crate::ui::avatar(&profile.name, false, 96);
    avatar.set_halign(gtk::Align::Center);
    page.append(&avatar);

    let name = gtk::Label::new(Some(&profile.name));
    name.add_css_class("title-3");
    page.append(&name);
    let presence = gtk::Label::new(Some("Online"));
    presence.add_css_class("dim-label");
    page.append(&presence);

    page.append(&gtk::Separator::new(gtk::Orientation::Horizontal));
    for (label, value) in [
        ("Email", &profile.email),
        ("Mobile", &profile.mobile),
        ("Status", &profile.status),
    ] {
        let caption = gtk::Label::new(Some(label));
        caption.add_css_class("dim-label");
        caption.add_css_class("caption");
        caption.set_halign(gtk::Align::Start);
        let text = gtk::Label::new(Some(value.as_str()));
        text.set_halign(gtk::Align::Start);
        text.set_wrap(true);
        page.append(&caption);
        page.append(&text);
    }
    page
}

fn switch_row(title: &str, subtitle: &str, active: bool, on_toggle: impl Fn(bool) + 'static) -> gtk::Box {
    let row = gtk::Box::new(gtk::Orientation::Horizontal, 6);
    let text = gtk::Box::new(gtk::Orientation::Vertical, 2);
    text.set_hexpand(true);
    let title = gtk::Label::new(Some(title));
    title.set_halign(gtk::Align::Start);
    let subtitle = gtk::Label::new(Some(subtitle));
    subtitle.add_css_class("dim-label");
    subtitle.add_css_class("caption");
    subtitle.set_halign(gtk::Align::Start);
    text.append(&title);
    text.append(&subtitle);

    let switch = gtk::Switch::new();
    switch.set_active(active);
    switch.set_valign(gtk::Align::Center);
    switch.connect_active_notify(move |s| on_toggle(s.is_active()));

    row.append(&text);
    row.append(&switch);
    row
}

fn settings_page(session: &Session, dispatch: &Dispatch) -> gtk::Box {
    let prefs = session.preferences();
    let page = gtk::Box::new(gtk::Orientation::Vertical, 12);
    page.set_margin_top(12);

    let d = dispatch.clone();
    page.append(&switch_row("Dark Mode", "Switch to dark theme", prefs.dark_mode, move |on| {
        d(Intent::SetDarkMode(on))
    }));
    let d = dispatch.clone();
    page.append(&switch_row(
        "Sound Notifications",
        "Play sound for new messages",
        prefs.sound_notifications,
        move |on| d(Intent::SetSoundNotifications(on)),
    ));
    let d = dispatch.clone();
    page.append(&switch_row(
        "Notifications",
        "Show alerts for new messages",
        prefs.notifications,
        move |on| d(Intent::SetNotifications(on)),
    ));

    let logout = gtk::Button::with_label("Logout");
    logout.add_css_class("destructive-action");
    logout.set_margin_top(12);
    let d = dispatch.clone();
    logout.connect_clicked(move |_| d(Intent::Logout));
    page.append(&logout);
    page
}
