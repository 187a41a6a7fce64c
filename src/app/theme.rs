use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::app::error::{AppError, Result};

/// Theme descriptor loaded from `themes/<name>.json`.
///
/// Maps named color roles to color strings and names the syntect theme used
/// for code blocks. Immutable after load; shared by the document renderer and
/// the plot script (which receives the color roles as a runtime table).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Internal syntect theme key, e.g. "base16-ocean.dark".
    pub syntax_theme: String,

    #[serde(rename = "panel.fill")]
    pub panel_fill: String,
    #[serde(rename = "bar.fill")]
    pub bar_fill: String,
    #[serde(rename = "axis.color")]
    pub axis_color: String,
    #[serde(rename = "label.color")]
    pub label_color: String,
    #[serde(rename = "subtitle.color")]
    pub subtitle_color: String,
    #[serde(rename = "title.color")]
    pub title_color: String,
    #[serde(rename = "ticks.color")]
    pub ticks_color: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            syntax_theme: "base16-ocean.dark".to_string(),
            panel_fill: "#001e38".to_string(),
            bar_fill: "#4a6d88".to_string(),
            axis_color: "#c6cdd7".to_string(),
            label_color: "#c6cdd7".to_string(),
            subtitle_color: "#c6cdd7".to_string(),
            title_color: "#c6cdd7".to_string(),
            ticks_color: "#c6cdd7".to_string(),
        }
    }
}

impl Theme {
    /// Load a theme descriptor from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|e| AppError::ResourceLoad(format!("{}: {e}", path.display())))?;
        serde_json::from_str(&raw)
            .map_err(|e| AppError::ResourceLoad(format!("{}: {e}", path.display())))
    }

    /// The color roles as (name, value) pairs, with names usable as Lua keys.
    pub fn color_roles(&self) -> [(&'static str, &str); 7] {
        [
            ("panel_fill", &self.panel_fill),
            ("bar_fill", &self.bar_fill),
            ("axis_color", &self.axis_color),
            ("label_color", &self.label_color),
            ("subtitle_color", &self.subtitle_color),
            ("title_color", &self.title_color),
            ("ticks_color", &self.ticks_color),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_theme_load_full_descriptor() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r##"{{
                "syntax_theme": "Solarized (dark)",
                "panel.fill": "#101010",
                "bar.fill": "#202020",
                "axis.color": "#303030",
                "label.color": "#404040",
                "subtitle.color": "#505050",
                "title.color": "#606060",
                "ticks.color": "#707070"
            }}"##
        )
        .unwrap();

        let theme = Theme::load(file.path()).unwrap();
        assert_eq!(theme.syntax_theme, "Solarized (dark)");
        assert_eq!(theme.panel_fill, "#101010");
        assert_eq!(theme.ticks_color, "#707070");
    }

    #[test]
    fn test_theme_load_fills_missing_roles_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r##"{{ "bar.fill": "#abcdef" }}"##).unwrap();

        let theme = Theme::load(file.path()).unwrap();
        assert_eq!(theme.bar_fill, "#abcdef");
        assert_eq!(theme.panel_fill, Theme::default().panel_fill);
        assert_eq!(theme.syntax_theme, "base16-ocean.dark");
    }

    #[test]
    fn test_theme_load_missing_file_is_resource_error() {
        let err = Theme::load(Path::new("/nonexistent/themes/ayu-dark.json")).unwrap_err();
        assert!(matches!(err, AppError::ResourceLoad(_)));
    }

    #[test]
    fn test_theme_load_invalid_json_is_resource_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json at all").unwrap();
        let err = Theme::load(file.path()).unwrap_err();
        assert!(matches!(err, AppError::ResourceLoad(_)));
    }

    #[test]
    fn test_color_roles_cover_all_fields() {
        let theme = Theme::default();
        let roles = theme.color_roles();
        assert_eq!(roles.len(), 7);
        assert!(roles.iter().any(|(k, v)| *k == "panel_fill" && *v == "#001e38"));
        assert!(roles.iter().any(|(k, v)| *k == "bar_fill" && *v == "#4a6d88"));
    }
}
