use std::cell::{Cell, OnceCell, RefCell};
use std::rc::{Rc, Weak};

use adw::prelude::*;
use adw::Application;
use gtk4 as gtk;
use log::debug;

use crate::events::{Intent, ToastVariant};
use crate::session::{Dialog, Screen};
use crate::ui::chat_view::ChatView;
use crate::ui::dialogs::{self, MembersDialog};
use crate::ui::settings::SettingsPanel;
use crate::ui::sidebar::Sidebar;
use crate::ui::{Dispatch, SharedSession};

enum OpenDialog {
    Permission(gtk::Window),
    CreateGroup(gtk::Window),
    Members(MembersDialog),
}

impl OpenDialog {
    fn kind(&self) -> Dialog {
        match self {
            OpenDialog::Permission(_) => Dialog::ContactPermission,
            OpenDialog::CreateGroup(_) => Dialog::CreateGroup,
            OpenDialog::Members(_) => Dialog::GroupMembers,
        }
    }

    fn window(&self) -> &gtk::Window {
        match self {
            OpenDialog::Permission(w) | OpenDialog::CreateGroup(w) => w,
            OpenDialog::Members(d) => d.window(),
        }
    }
}

pub struct MainWindow {
    app: Application,
    window: adw::ApplicationWindow,
    overlay: adw::ToastOverlay,
    session: SharedSession,
    dispatch: Dispatch,
    sidebar: Sidebar,
    chat: ChatView,
    settings: SettingsPanel,
    settings_revealer: gtk::Revealer,
    dialog: RefCell<Option<OpenDialog>>,
    rendering: Cell<bool>,
}

impl MainWindow {
    /// Applies an intent and redraws. Signals fired while redrawing are
    /// dropped, they only echo state the session already holds.
    pub fn dispatch(self: &Rc<Self>, intent: Intent) {
        if self.rendering.get() {
            debug!("ignoring {intent:?} during render");
            return;
        }
        self.session.borrow_mut().dispatch(intent);
        self.render();
    }

    fn render(self: &Rc<Self>) {
        if self.session.borrow().screen() == Screen::Landing {
            self.close_dialog();
            crate::ui::login::show_landing_window(&self.app, self.session.clone());
            self.window.close();
            return;
        }

        self.rendering.set(true);
        let toasts = self.session.borrow_mut().take_toasts();
        for toast in toasts {
            let t = adw::Toast::new(&toast.text());
            if toast.variant == ToastVariant::Destructive {
                t.set_priority(adw::ToastPriority::High);
            }
            self.overlay.add_toast(t);
        }

        let session = self.session.borrow();
        self.sidebar.render(&session);
        self.chat.render(&session, &self.dispatch);
        match session.settings_tab() {
            Some(tab) => {
                self.settings.show_tab(tab);
                self.settings_revealer.set_reveal_child(true);
            }
            None => self.settings_revealer.set_reveal_child(false),
        }
        let scheme = if session.preferences().dark_mode {
            adw::ColorScheme::ForceDark
        } else {
            adw::ColorScheme::Default
        };
        adw::StyleManager::default().set_color_scheme(scheme);

        let wanted = session.dialog();
        let current = self.dialog.borrow().as_ref().map(OpenDialog::kind);
        if wanted != current {
            self.close_dialog();
            let opened = match wanted {
                Some(Dialog::ContactPermission) => Some(OpenDialog::Permission(
                    dialogs::contact_permission(&self.window, &self.dispatch),
                )),
                Some(Dialog::CreateGroup) => Some(OpenDialog::CreateGroup(
                    dialogs::create_group(&self.window, &session, &self.dispatch),
                )),
                Some(Dialog::GroupMembers) => {
                    Some(OpenDialog::Members(MembersDialog::new(&self.window, &self.dispatch)))
                }
                None => None,
            };
            if let Some(opened) = opened {
                opened.window().present();
                *self.dialog.borrow_mut() = Some(opened);
            }
        }
        if let Some(OpenDialog::Members(members)) = self.dialog.borrow().as_ref() {
            members.render(&session, &self.dispatch);
        }
        drop(session);
        self.rendering.set(false);
    }

    fn close_dialog(&self) {
        if let Some(open) = self.dialog.borrow_mut().take() {
            open.window().destroy();
        }
    }
}

pub fn show_main_window(app: &Application, session: SharedSession) {
    let window = adw::ApplicationWindow::builder()
        .application(app)
        .title("Realtime Chat")
        .default_width(1100)
        .default_height(680)
        .build();

    let hub: Rc<OnceCell<Weak<MainWindow>>> = Rc::new(OnceCell::new());
    let dispatch: Dispatch = {
        let hub = hub.clone();
        Rc::new(move |intent| {
            if let Some(win) = hub.get().and_then(Weak::upgrade) {
                win.dispatch(intent);
            }
        })
    };

    let overlay = adw::ToastOverlay::new();
    let split = adw::Flap::builder()
        .reveal_flap(true)
        .locked(true)
        .modal(false)
        .build();

    let sidebar = Sidebar::new(dispatch.clone());
    split.set_flap(Some(&sidebar.widget()));

    let chat = ChatView::new(dispatch.clone());
    let settings = SettingsPanel::new(&session.borrow(), dispatch.clone());
    let settings_revealer = gtk::Revealer::builder()
        .transition_type(gtk::RevealerTransitionType::SlideLeft)
        .child(&settings.widget())
        .build();

    let body = gtk::Box::new(gtk::Orientation::Horizontal, 0);
    body.append(&chat.widget());
    body.append(&settings_revealer);
    split.set_content(Some(&body));
    overlay.set_child(Some(&split));

    let container = gtk::Box::new(gtk::Orientation::Vertical, 0);
    let header = adw::HeaderBar::new();
    let title = gtk::Label::new(Some("Realtime Chat"));
    header.set_title_widget(Some(&title));
    container.append(&header);
    container.append(&overlay);
    window.set_content(Some(&container));

    let main = Rc::new(MainWindow {
        app: app.clone(),
        window: window.clone(),
        overlay,
        session,
        dispatch,
        sidebar,
        chat,
        settings,
        settings_revealer,
        dialog: RefCell::new(None),
        rendering: Cell::new(false),
    });
    let _ = hub.set(Rc::downgrade(&main));
    main.render();

    // the window keeps its controller alive until it is closed
    let controller = RefCell::new(Some(main));
    window.connect_close_request(move |_| {
        controller.borrow_mut().take();
        gtk::glib::Propagation::Proceed
    });
    window.present();
}
