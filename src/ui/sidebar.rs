use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::prelude::*;

use crate::chat::models::{Conversation, ConversationId};
use crate::events::{Intent, SettingsTab};
use crate::session::Session;
use crate::ui::Dispatch;

pub struct Sidebar {
    root: gtk::Box,
    list: gtk::ListBox,
    rows: Rc<RefCell<Vec<ConversationId>>>,
}

impl Sidebar {
    pub fn new(dispatch: Dispatch) -> Self {
        let root = gtk::Box::new(gtk::Orientation::Vertical, 6);
        root.set_margin_top(8);
        root.set_margin_bottom(8);
        root.set_margin_start(8);
        root.set_margin_end(8);
        root.set_width_request(300);

        let title = gtk::Label::new(Some("Chats"));
        title.add_css_class("title-3");
        title.set_halign(gtk::Align::Start);
        root.append(&title);

        let create_group = gtk::Button::with_label("Create Group");
        {
            let dispatch = dispatch.clone();
            create_group.connect_clicked(move |_| dispatch(Intent::OpenCreateGroup));
        }
        root.append(&create_group);

        let search = gtk::SearchEntry::new();
        search.set_placeholder_text(Some("Search chats or users..."));
        {
            let dispatch = dispatch.clone();
            search.connect_search_changed(move |entry| {
                dispatch(Intent::Search(entry.text().to_string()))
            });
        }
        root.append(&search);

        let scroller = gtk::ScrolledWindow::builder().vexpand(true).build();
        let list = gtk::ListBox::new();
        list.add_css_class("navigation-sidebar");
        scroller.set_child(Some(&list));
        root.append(&scroller);

        let rows: Rc<RefCell<Vec<ConversationId>>> = Rc::new(RefCell::new(Vec::new()));
        {
            let rows = rows.clone();
            let dispatch = dispatch.clone();
            list.connect_row_activated(move |_, row| {
                let id = usize::try_from(row.index())
                    .ok()
                    .and_then(|idx| rows.borrow().get(idx).cloned());
                if let Some(id) = id {
                    dispatch(Intent::Select(id));
                }
            });
        }

        let new_chat = gtk::Button::with_label("New Chat");
        new_chat.add_css_class("suggested-action");
        new_chat.add_css_class("pill");
        new_chat.set_halign(gtk::Align::End);
        {
            let dispatch = dispatch.clone();
            new_chat.connect_clicked(move |_| dispatch(Intent::NewChat));
        }
        root.append(&new_chat);

        // Footer
        let footer = gtk::Box::new(gtk::Orientation::Horizontal, 6);
        footer.set_homogeneous(true);
        for (label, tab) in [("Profile", SettingsTab::Profile), ("Settings", SettingsTab::Settings)] {
            let btn = gtk::Button::with_label(label);
            btn.add_css_class("flat");
            let dispatch = dispatch.clone();
            btn.connect_clicked(move |_| dispatch(Intent::OpenSettings(tab)));
            footer.append(&btn);
        }
        root.append(&footer);

        Self { root, list, rows }
    }

    pub fn widget(&self) -> gtk::Widget {
        self.root.clone().upcast()
    }

    pub fn render(&self, session: &Session) {
        while let Some(child) = self.list.first_child() {
            self.list.remove(&child);
        }
        let selected = session.selected().map(|c| c.id.clone());
        let mut ids = Vec::new();
        for conv in session.visible_conversations() {
            let row = gtk::ListBoxRow::new();
            row.set_child(Some(&conversation_row(conv)));
            self.list.append(&row);
            if selected.as_ref() == Some(&conv.id) {
                self.list.select_row(Some(&row));
            }
            ids.push(conv.id.clone());
        }
        *self.rows.borrow_mut() = ids;
    }
}

fn conversation_row(conv: &Conversation) -> gtk::Box {
    let row = gtk::Box::new(gtk::Orientation::Horizontal, 10);
    row.set_margin_top(8);
    row.set_margin_bottom(8);
    row.set_margin_start(8);
    row.set_margin_end(8);
    row.append(&crate::ui::avatar(&conv.name, conv.is_group(), 40));

    let text = gtk::Box::new(gtk::Orientation::Vertical, 2);
    text.set_hexpand(true);

    let top = gtk::Box::new(gtk::Orientation::Horizontal, 6);
    let name = gtk::Label::new(Some(&conv.name));
    name.add_css_class("heading");
    name.set_halign(gtk::Align::Start);
    name.set_hexpand(true);
    name.set_ellipsize(gtk::pango::EllipsizeMode::End);
    top.append(&name);
    if conv.shows_online() {
        let dot = gtk::Label::new(Some("●"));
        dot.add_css_class("success");
        top.append(&dot);
    }
    let ts = gtk::Label::new(Some(&conv.timestamp));
    ts.add_css_class("dim-label");
    ts.add_css_class("caption");
    top.append(&ts);
    text.append(&top);

    let bottom = gtk::Box::new(gtk::Orientation::Horizontal, 6);
    let preview = gtk::Label::new(Some(&conv.last_message));
    preview.add_css_class("dim-label");
    preview.set_halign(gtk::Align::Start);
    preview.set_hexpand(true);
    preview.set_ellipsize(gtk::pango::EllipsizeMode::End);
    bottom.append(&preview);
    if conv.unread > 0 {
        let badge = gtk::Label::new(Some(&conv.unread.to_string()));
        badge.add_css_class("accent");
        badge.add_css_class("heading");
        bottom.append(&badge);
    }
    text.append(&bottom);

    row.append(&text);
    row
}
