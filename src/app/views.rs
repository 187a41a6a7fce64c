//! Pure render functions for the reactive cells: value in, markup out.

use crate::app::slug::slugify;

/// Status line: empty when no message has been written yet.
pub fn message_markup(text: &Option<String>) -> String {
    text.clone().unwrap_or_default()
}

/// The region popup menu with one option per region, each carrying a
/// slug-derived element id.
pub fn region_menu_markup(options: &[String]) -> String {
    let mut out =
        String::from("<label for='region-select'> Region: <select id=\"region-select\">");
    for option in options {
        out.push_str(&format!(
            "<option id='reg-opt-{}'>{}</option>",
            slugify(option),
            option
        ));
    }
    out.push_str("</select></label>");
    out
}

/// The currently selected plot, verbatim; empty when nothing is selected.
pub fn selected_plot_markup(svg: &Option<String>) -> String {
    svg.clone().unwrap_or_default()
}
