use std::path::PathBuf;

use fltk::{app, dialog, frame::Frame, image::SvgImage, prelude::*};

use plot_pad::app::page::Page;
use plot_pad::app::{AppState, Message, RuntimeConfig, render, views};
use plot_pad::ui::{main_window, theme as ui_theme};

const DOCUMENT_ID: &str = "index";
const THEME_NAME: &str = "ayu-dark";
const LANGS: &[&str] = &["javascript", "lua", "json", "md", "xml"];

fn main() {
    let fl_app = app::App::default();
    let (sender, receiver) = app::channel::<Message>();
    let base = asset_base_dir();

    let mut win = main_window::build("PlotPad");

    // Render the page scaffold first, before anything else is wired.
    let mut page = Page::new();
    let theme =
        match render::render_document(&mut page, DOCUMENT_ID, THEME_NAME, LANGS, true, &base) {
            Ok(theme) => theme,
            Err(e) => {
                win.message.set_label(&format!("⚠️ Startup failed: {e}"));
                win.window.show();
                dialog::alert_default(&format!("Failed to render document: {e}"));
                while fl_app.wait() {}
                return;
            }
        };
    if let Some(title) = &page.title {
        win.window.set_label(title);
    }
    win.content.set_value(&page.to_html());
    ui_theme::apply_theme(&mut win, &theme);

    // Reactive cells and their widget bindings.
    let mut state = AppState::new(theme);

    let mut message_frame = win.message.clone();
    state.message.bind(views::message_markup, move |_, markup| {
        message_frame.set_label(markup);
        message_frame.redraw();
        // boot runs before the event loop, so push each update to the screen
        app::flush();
    });

    let mut region_choice = win.region.clone();
    state.regions.bind(
        |options: &Vec<String>| views::region_menu_markup(options),
        move |options, _| {
            region_choice.clear();
            for option in options {
                region_choice.add_choice(option);
            }
            if !options.is_empty() {
                region_choice.set_value(0);
            }
            region_choice.redraw();
        },
    );

    let mut plot_frame = win.plot.clone();
    state
        .selected_plot
        .bind(views::selected_plot_markup, move |_, markup| {
            set_plot_image(&mut plot_frame, markup);
        });

    // Selections can fire as soon as this is registered; the boot phase
    // machine rejects the early ones.
    win.region.set_callback(move |choice| {
        if let Some(region) = choice.choice() {
            sender.send(Message::RegionSelected(region));
        }
    });

    win.window.show();

    if let Err(e) = state.boot(RuntimeConfig {
        package_dir: Some(base.join("packages")),
    }) {
        eprintln!("startup failed: {e}");
    }

    while fl_app.wait() {
        if let Some(Message::RegionSelected(region)) = receiver.recv() {
            if let Err(e) = state.on_region_selected(&region) {
                eprintln!("selection '{region}' not rendered: {e}");
            }
        }
    }
}

fn set_plot_image(frame: &mut Frame, markup: &str) {
    if markup.is_empty() {
        frame.set_image(None::<SvgImage>);
    } else {
        match SvgImage::from_data(markup) {
            Ok(mut image) => {
                image.scale(frame.w(), frame.h(), true, true);
                frame.set_image(Some(image));
            }
            Err(e) => eprintln!("invalid svg image: {e}"),
        }
    }
    frame.redraw();
}

/// Prefer `assets/` next to the executable, fall back to the working dir.
fn asset_base_dir() -> PathBuf {
    if let Ok(exe) = std::env::current_exe()
        && let Some(dir) = exe.parent()
    {
        let candidate = dir.join("assets");
        if candidate.exists() {
            return candidate;
        }
    }
    PathBuf::from("assets")
}
