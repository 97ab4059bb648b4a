pub mod chat_view;
pub mod dialogs;
pub mod login;
pub mod main_window;
pub mod settings;
pub mod sidebar;

use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::prelude::*;

use crate::events::Intent;
use crate::session::Session;

pub type SharedSession = Rc<RefCell<Session>>;

/// Callback widgets use to hand intents to the window that owns the session.
pub type Dispatch = Rc<dyn Fn(Intent)>;

pub(crate) fn clear_box(container: &gtk::Box) {
    while let Some(child) = container.first_child() {
        container.remove(&child);
    }
}

/// Round initials badge, or the group glyph.
pub(crate) fn avatar(name: &str, group: bool, size: i32) -> gtk::Widget {
    let text = if group {
        "👥".to_string()
    } else {
        crate::utils::initials(name)
    };
    let label = gtk::Label::new(Some(&text));
    label.add_css_class("heading");
    label.set_size_request(size, size);
    let frame = gtk::Frame::new(None);
    frame.set_child(Some(&label));
    frame.set_valign(gtk::Align::Start);
    frame.upcast()
}
