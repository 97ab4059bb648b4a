use adw::prelude::*;
use adw::Application;
use gtk4 as gtk;

use crate::events::Intent;
use crate::ui::SharedSession;

const FEATURES: [(&str, &str); 3] = [
    ("Lightning Fast", "Real-time messaging with instant delivery and read receipts"),
    ("Secure & Private", "End-to-end encryption keeps your conversations safe and private"),
    ("Stay Connected", "Chat with unlimited users and create group conversations"),
];

pub fn show_landing_window(app: &Application, session: SharedSession) {
    let window = adw::ApplicationWindow::builder()
        .application(app)
        .title("Realtime Chat")
        .default_width(860)
        .default_height(560)
        .build();

    let toast_overlay = adw::ToastOverlay::new();

    // Root container
    let root = gtk::Box::new(gtk::Orientation::Vertical, 18);
    root.set_margin_top(48);
    root.set_margin_bottom(48);
    root.set_margin_start(24);
    root.set_margin_end(24);
    root.set_valign(gtk::Align::Center);

    // Hero
    let title = gtk::Label::new(Some("Connect Instantly with"));
    title.add_css_class("title-1");
    root.append(&title);
    let brand = gtk::Label::new(Some("Realtime Chat"));
    brand.add_css_class("title-1");
    brand.add_css_class("accent");
    root.append(&brand);

    let pitch = gtk::Label::new(Some(
        "Experience seamless communication with our modern chat platform. \
         Stay connected with friends, family, and colleagues in real-time.",
    ));
    pitch.add_css_class("dim-label");
    pitch.set_wrap(true);
    pitch.set_justify(gtk::Justification::Center);
    pitch.set_max_width_chars(60);
    root.append(&pitch);

    let actions = gtk::Box::new(gtk::Orientation::Horizontal, 12);
    actions.set_halign(gtk::Align::Center);
    let get_started = gtk::Button::with_label("Get Started");
    get_started.add_css_class("suggested-action");
    get_started.add_css_class("pill");
    let sign_in = gtk::Button::with_label("Sign In");
    sign_in.add_css_class("pill");
    actions.append(&get_started);
    actions.append(&sign_in);
    root.append(&actions);

    // Feature cards
    let cards = gtk::Box::new(gtk::Orientation::Horizontal, 12);
    cards.set_homogeneous(true);
    cards.set_margin_top(24);
    for (heading, body) in FEATURES {
        let card = gtk::Box::new(gtk::Orientation::Vertical, 6);
        card.add_css_class("card");
        let heading = gtk::Label::new(Some(heading));
        heading.add_css_class("heading");
        let body = gtk::Label::new(Some(body));
        body.add_css_class("dim-label");
        body.set_wrap(true);
        body.set_justify(gtk::Justification::Center);
        for label in [&heading, &body] {
            label.set_margin_start(12);
            label.set_margin_end(12);
        }
        heading.set_margin_top(12);
        body.set_margin_bottom(12);
        card.append(&heading);
        card.append(&body);
        cards.append(&card);
    }
    root.append(&cards);

    toast_overlay.set_child(Some(&root));
    // Add a header bar inside content to show window decorations
    let container = gtk::Box::new(gtk::Orientation::Vertical, 0);
    let header = adw::HeaderBar::new();
    let header_title = gtk::Label::new(Some("Realtime Chat"));
    header.set_title_widget(Some(&header_title));
    container.append(&header);
    container.append(&toast_overlay);
    window.set_content(Some(&container));

    // Leftovers from the previous screen, e.g. "Logged out"
    for toast in session.borrow_mut().take_toasts() {
        toast_overlay.add_toast(adw::Toast::new(&toast.text()));
    }

    let on_enter = {
        let app = app.clone();
        let window = window.clone();
        move || {
            session.borrow_mut().dispatch(Intent::SignIn);
            crate::ui::main_window::show_main_window(&app, session.clone());
            window.close();
        }
    };

    use std::rc::Rc;
    let on_enter: Rc<dyn Fn()> = Rc::new(on_enter);
    {
        let on_enter = on_enter.clone();
        get_started.connect_clicked(move |_| (on_enter)());
    }
    sign_in.connect_clicked(move |_| (on_enter)());

    window.present();
}
