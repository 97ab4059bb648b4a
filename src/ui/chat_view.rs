use std::rc::Rc;

use gtk4 as gtk;
use gtk4::prelude::*;

use crate::events::Intent;
use crate::session::Session;
use crate::ui::{Dispatch, clear_box};

pub struct ChatView {
    stack: gtk::Stack,
    header: gtk::Box,
    scroller: gtk::ScrolledWindow,
    messages_box: gtk::Box,
}

impl ChatView {
    pub fn new(dispatch: Dispatch) -> Self {
        let stack = gtk::Stack::new();
        stack.set_hexpand(true);
        stack.set_vexpand(true);

        let empty = adw::StatusPage::builder()
            .icon_name("mail-unread-symbolic")
            .title("Select a chat to start messaging")
            .description("Choose a conversation from the sidebar")
            .build();
        stack.add_named(&empty, Some("empty"));

        let root = gtk::Box::new(gtk::Orientation::Vertical, 6);
        root.set_margin_top(8);
        root.set_margin_bottom(8);
        root.set_margin_start(8);
        root.set_margin_end(8);

        let header = gtk::Box::new(gtk::Orientation::Horizontal, 10);
        root.append(&header);
        root.append(&gtk::Separator::new(gtk::Orientation::Horizontal));

        let scroller = gtk::ScrolledWindow::builder()
            .vexpand(true)
            .hexpand(true)
            .build();
        let messages_box = gtk::Box::new(gtk::Orientation::Vertical, 6);
        scroller.set_child(Some(&messages_box));
        root.append(&scroller);

        // Input row
        let input_row = gtk::Box::new(gtk::Orientation::Horizontal, 6);
        let entry = gtk::Entry::new();
        entry.set_hexpand(true);
        entry.set_placeholder_text(Some("Type a message..."));
        let send_btn = gtk::Button::with_label("Send");
        send_btn.add_css_class("suggested-action");
        input_row.append(&entry);
        input_row.append(&send_btn);
        root.append(&input_row);
        stack.add_named(&root, Some("chat"));

        let send: Rc<dyn Fn()> = {
            let entry = entry.clone();
            Rc::new(move || {
                let text = entry.text().to_string();
                if text.trim().is_empty() {
                    return;
                }
                entry.set_text("");
                dispatch(Intent::SendMessage(text));
            })
        };
        {
            let send = send.clone();
            send_btn.connect_clicked(move |_| (send)());
        }
        entry.connect_activate(move |_| (send)());

        Self {
            stack,
            header,
            scroller,
            messages_box,
        }
    }

    pub fn widget(&self) -> gtk::Widget {
        self.stack.clone().upcast()
    }

    pub fn render(&self, session: &Session, dispatch: &Dispatch) {
        let Some(conv) = session.selected() else {
            self.stack.set_visible_child_name("empty");
            return;
        };
        self.stack.set_visible_child_name("chat");

        clear_box(&self.header);
        self.header
            .append(&crate::ui::avatar(&conv.name, conv.is_group(), 40));
        let titles = gtk::Box::new(gtk::Orientation::Vertical, 2);
        let name = gtk::Label::new(Some(&conv.name));
        name.add_css_class("heading");
        name.set_halign(gtk::Align::Start);
        let status = gtk::Label::new(Some(&conv.status_line()));
        status.add_css_class("dim-label");
        status.add_css_class("caption");
        status.set_halign(gtk::Align::Start);
        titles.append(&name);
        titles.append(&status);
        titles.set_hexpand(true);
        self.header.append(&titles);
        if conv.is_group() {
            let members = gtk::Button::with_label("Members");
            members.add_css_class("flat");
            let dispatch = dispatch.clone();
            members.connect_clicked(move |_| dispatch(Intent::OpenMembers));
            self.header.append(&members);
        }

        clear_box(&self.messages_box);
        for message in session.thread() {
            let bubble = gtk::Box::new(gtk::Orientation::Vertical, 2);
            bubble.add_css_class("card");
            let text = gtk::Label::new(Some(&message.content));
            text.set_wrap(true);
            text.set_max_width_chars(48);
            text.set_xalign(0.0);
            let time = gtk::Label::new(Some(&message.timestamp));
            time.add_css_class("dim-label");
            time.add_css_class("caption");
            bubble.append(&text);
            bubble.append(&time);
            for child in [&text, &time] {
                child.set_margin_start(10);
                child.set_margin_end(10);
            }
            text.set_margin_top(6);
            time.set_margin_bottom(6);
            if message.is_mine() {
                bubble.set_halign(gtk::Align::End);
                time.set_halign(gtk::Align::End);
            } else {
                bubble.set_halign(gtk::Align::Start);
                time.set_halign(gtk::Align::Start);
            }
            self.messages_box.append(&bubble);
        }
        let adj = self.scroller.vadjustment();
        adj.set_value(adj.upper());
    }
}
