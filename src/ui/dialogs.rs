use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::glib;
use gtk4::prelude::*;

use crate::chat::models::{ContactId, Role};
use crate::events::{Intent, PermissionResponse};
use crate::session::Session;
use crate::ui::{Dispatch, clear_box};

fn dialog_window(parent: &impl IsA<gtk::Window>, title: &str, dispatch: &Dispatch) -> gtk::Window {
    let window = gtk::Window::builder()
        .title(title)
        .transient_for(parent)
        .modal(true)
        .default_width(420)
        .resizable(false)
        .build();
    // the session decides when the window goes away
    let dispatch = dispatch.clone();
    window.connect_close_request(move |_| {
        dispatch(Intent::CloseDialog);
        glib::Propagation::Stop
    });
    window
}

fn content_box() -> gtk::Box {
    let content = gtk::Box::new(gtk::Orientation::Vertical, 12);
    content.set_margin_top(16);
    content.set_margin_bottom(16);
    content.set_margin_start(16);
    content.set_margin_end(16);
    content
}

pub fn contact_permission(parent: &impl IsA<gtk::Window>, dispatch: &Dispatch) -> gtk::Window {
    let window = dialog_window(parent, "Access Your Contacts", dispatch);
    let content = content_box();

    let title = gtk::Label::new(Some("Access Your Contacts"));
    title.add_css_class("title-3");
    title.set_halign(gtk::Align::Start);
    content.append(&title);
    let body = gtk::Label::new(Some(
        "This app would like to access your contacts to help you find and connect with friends who are also using the app.",
    ));
    body.set_wrap(true);
    body.set_xalign(0.0);
    content.append(&body);

    for (label, response, class) in [
        ("Allow Always", PermissionResponse::Always, Some("suggested-action")),
        ("Allow", PermissionResponse::Allow, None),
        ("Deny", PermissionResponse::Deny, Some("flat")),
    ] {
        let btn = gtk::Button::with_label(label);
        if let Some(class) = class {
            btn.add_css_class(class);
        }
        let dispatch = dispatch.clone();
        btn.connect_clicked(move |_| dispatch(Intent::ContactAccess(response)));
        content.append(&btn);
    }

    window.set_child(Some(&content));
    window
}

pub fn create_group(
    parent: &impl IsA<gtk::Window>,
    session: &Session,
    dispatch: &Dispatch,
) -> gtk::Window {
    let window = dialog_window(parent, "Create New Group", dispatch);
    let content = content_box();

    let info = gtk::Label::new(Some(
        "Add a group name and select members to create a group chat",
    ));
    info.add_css_class("dim-label");
    info.set_wrap(true);
    info.set_xalign(0.0);
    content.append(&info);

    let name_entry = gtk::Entry::new();
    name_entry.set_placeholder_text(Some("Enter group name..."));
    content.append(&name_entry);

    let members_title = gtk::Label::new(Some("Add Members"));
    members_title.add_css_class("heading");
    members_title.set_halign(gtk::Align::Start);
    content.append(&members_title);

    // Selection keeps toggle order; the first pick becomes the admin.
    let picked: Rc<RefCell<Vec<ContactId>>> = Rc::new(RefCell::new(Vec::new()));
    let checks = gtk::Box::new(gtk::Orientation::Vertical, 4);
    for contact in session.store().directory().contacts() {
        let check = gtk::CheckButton::with_label(&contact.label());
        let picked = picked.clone();
        let id = contact.id.clone();
        check.connect_toggled(move |btn| {
            let mut picked = picked.borrow_mut();
            if btn.is_active() {
                picked.push(id.clone());
            } else {
                picked.retain(|p| p != &id);
            }
        });
        checks.append(&check);
    }
    let scroller = gtk::ScrolledWindow::builder()
        .max_content_height(200)
        .propagate_natural_height(true)
        .child(&checks)
        .build();
    content.append(&scroller);

    let buttons = gtk::Box::new(gtk::Orientation::Horizontal, 6);
    buttons.set_halign(gtk::Align::End);
    let cancel = gtk::Button::with_label("Cancel");
    {
        let dispatch = dispatch.clone();
        cancel.connect_clicked(move |_| dispatch(Intent::CloseDialog));
    }
    let create = gtk::Button::with_label("Create Group");
    create.add_css_class("suggested-action");
    {
        let dispatch = dispatch.clone();
        let name_entry = name_entry.clone();
        create.connect_clicked(move |_| {
            let members = picked.borrow().clone();
            dispatch(Intent::CreateGroup {
                name: name_entry.text().to_string(),
                members,
            });
        });
    }
    buttons.append(&cancel);
    buttons.append(&create);
    content.append(&buttons);

    window.set_child(Some(&content));
    window
}

/// Roster dialog; its content is rebuilt whenever the session changes.
pub struct MembersDialog {
    window: gtk::Window,
    content: gtk::Box,
}

impl MembersDialog {
    pub fn new(parent: &impl IsA<gtk::Window>, dispatch: &Dispatch) -> Self {
        let window = dialog_window(parent, "Group Members", dispatch);
        let content = content_box();
        let scroller = gtk::ScrolledWindow::builder()
            .max_content_height(400)
            .propagate_natural_height(true)
            .child(&content)
            .build();
        window.set_child(Some(&scroller));
        Self { window, content }
    }

    pub fn window(&self) -> &gtk::Window {
        &self.window
    }

    pub fn render(&self, session: &Session, dispatch: &Dispatch) {
        clear_box(&self.content);
        let Some(conv) = session.selected() else { return };
        let Some(roster) = conv.roster() else { return };
        let manage = session.can_manage_members();
        let seat = session.my_seat().map(|m| m.id.clone());

        let title = gtk::Label::new(Some(&conv.name));
        title.add_css_class("title-3");
        title.set_halign(gtk::Align::Start);
        let summary = gtk::Label::new(Some(&conv.status_line()));
        summary.add_css_class("dim-label");
        summary.set_halign(gtk::Align::Start);
        self.content.append(&title);
        self.content.append(&summary);

        for member in roster {
            let row = gtk::Box::new(gtk::Orientation::Horizontal, 10);
            row.append(&crate::ui::avatar(&member.name, false, 36));

            let text = gtk::Box::new(gtk::Orientation::Vertical, 2);
            text.set_hexpand(true);
            let name = gtk::Label::new(Some(&member.name));
            name.add_css_class("heading");
            name.set_halign(gtk::Align::Start);
            let detail = format!(
                "{} · {}",
                if member.online { "Online" } else { "Offline" },
                member.role.label()
            );
            let detail = gtk::Label::new(Some(&detail));
            detail.add_css_class("dim-label");
            detail.add_css_class("caption");
            detail.set_halign(gtk::Align::Start);
            text.append(&name);
            text.append(&detail);
            row.append(&text);

            if manage && seat.as_ref() != Some(&member.id) {
                let (label, role) = match member.role {
                    Role::Admin => ("Make member", Role::Member),
                    Role::Member => ("Make admin", Role::Admin),
                };
                let role_btn = gtk::Button::with_label(label);
                role_btn.add_css_class("flat");
                let d = dispatch.clone();
                let id = member.id.clone();
                role_btn.connect_clicked(move |_| d(Intent::SetRole(id.clone(), role)));
                row.append(&role_btn);

                let remove = gtk::Button::with_label("Remove");
                remove.add_css_class("destructive-action");
                let d = dispatch.clone();
                let id = member.id.clone();
                remove.connect_clicked(move |_| d(Intent::RemoveMember(id.clone())));
                row.append(&remove);
            }
            self.content.append(&row);
        }

        let addable = session.addable_contacts();
        if manage && !addable.is_empty() {
            let add_row = gtk::Box::new(gtk::Orientation::Horizontal, 6);
            let labels: Vec<String> = addable.iter().map(|c| c.label()).collect();
            let ids: Vec<ContactId> = addable.iter().map(|c| c.id.clone()).collect();
            let dropdown = gtk::DropDown::from_strings(
                &labels.iter().map(String::as_str).collect::<Vec<_>>(),
            );
            dropdown.set_hexpand(true);
            let add = gtk::Button::with_label("Add");
            add.add_css_class("suggested-action");
            let d = dispatch.clone();
            let dropdown_for_add = dropdown.clone();
            add.connect_clicked(move |_| {
                let pos = dropdown_for_add.selected();
                if let Some(id) = usize::try_from(pos).ok().and_then(|i| ids.get(i)) {
                    d(Intent::AddMember(id.clone()));
                }
            });
            add_row.append(&dropdown);
            add_row.append(&add);
            self.content.append(&add_row);
        }
    }
}
