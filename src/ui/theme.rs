use fltk::enums::Color;
use fltk::prelude::*;

use crate::app::theme::Theme;
use crate::ui::main_window::MainWindow;

/// Parse a `#rrggbb` color string.
pub fn hex_rgb(s: &str) -> Option<(u8, u8, u8)> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Apply the theme descriptor's colors to the window and its anchors.
pub fn apply_theme(win: &mut MainWindow, theme: &Theme) {
    if let Some((r, g, b)) = hex_rgb(&theme.panel_fill) {
        let bg = Color::from_rgb(r, g, b);
        win.window.set_color(bg);
        win.plot.set_color(bg);
        win.content.set_color(bg);
    }
    if let Some((r, g, b)) = hex_rgb(&theme.label_color) {
        let fg = Color::from_rgb(r, g, b);
        win.window.set_label_color(fg);
        win.message.set_label_color(fg);
        win.region_label.set_label_color(fg);
    }
    win.window.redraw();
}
