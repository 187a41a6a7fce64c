//! Document renderer: markdown with JSON front matter, fenced code blocks
//! highlighted through syntect, and page-head metadata emission.

use std::fs;
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd, html};
use serde_json::Value;
use syntect::highlighting::{Theme as SyntectTheme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::app::error::{AppError, Result};
use crate::app::page::{Page, create_meta_tag};
use crate::app::theme::Theme;

/// Highlighting service for a fixed language set.
///
/// Languages outside the configured set fall back to plain code blocks;
/// the `svg` alias maps to `xml` (same grammar as far as fences go).
#[derive(Debug)]
pub struct Highlighter {
    syntax_set: SyntaxSet,
    theme: SyntectTheme,
    langs: Vec<String>,
}

impl Highlighter {
    pub fn new(syntax_theme_key: &str, langs: &[&str]) -> Result<Self> {
        let syntax_set = SyntaxSet::load_defaults_newlines();
        let theme_set = ThemeSet::load_defaults();
        let theme = theme_set
            .themes
            .get(syntax_theme_key)
            .cloned()
            .ok_or_else(|| {
                AppError::ResourceLoad(format!("unknown syntax theme '{syntax_theme_key}'"))
            })?;

        Ok(Self {
            syntax_set,
            theme,
            langs: langs.iter().map(|l| l.to_string()).collect(),
        })
    }

    /// Highlight one snippet in the active theme.
    ///
    /// Returns None when the language is outside the configured set or has no
    /// grammar in the default syntax set.
    pub fn highlight_snippet(&self, code: &str, lang: &str) -> Option<String> {
        let lang = if lang == "svg" { "xml" } else { lang };
        if !self.langs.iter().any(|l| l == lang) {
            return None;
        }
        let syntax = self.syntax_set.find_syntax_by_token(lang)?;
        highlighted_html_for_string(code, &self.syntax_set, syntax, &self.theme).ok()
    }
}

/// Render a markdown document into the page.
///
/// Loads `themes/<theme_name>.json` and `md/<document_id>.md` under
/// `base_dir`, highlights fenced code blocks for the requested language set,
/// and - when `emit_metadata` is set - populates the page title and
/// og/twitter head tags from the document's JSON front matter.
///
/// Returns the loaded theme descriptor so the caller can share it with the
/// plot renderer.
pub fn render_document(
    page: &mut Page,
    document_id: &str,
    theme_name: &str,
    langs: &[&str],
    emit_metadata: bool,
    base_dir: &Path,
) -> Result<Theme> {
    let theme = Theme::load(&base_dir.join("themes").join(format!("{theme_name}.json")))?;
    let highlighter = Highlighter::new(&theme.syntax_theme, langs)?;

    let md_path = base_dir.join("md").join(format!("{document_id}.md"));
    let source = fs::read_to_string(&md_path)
        .map_err(|e| AppError::ResourceLoad(format!("{}: {e}", md_path.display())))?;

    let (front_matter, body) = split_front_matter(&source);
    if let Some(raw) = front_matter {
        let value: Value = serde_json::from_str(raw)?;
        if emit_metadata {
            apply_front_matter(page, &value);
        }
    }

    let html = render_markdown(body, &highlighter);
    page.append_content(&html);
    Ok(theme)
}

/// Split a leading `---`-fenced front matter block off a markdown source.
///
/// Returns the raw block body (without fences) and the remaining document.
/// Anything that doesn't open with `---` on the very first line is treated
/// as front-matter-free.
pub fn split_front_matter(source: &str) -> (Option<&str>, &str) {
    let rest = source.strip_prefix("\u{feff}").unwrap_or(source);
    let after_open = match rest.strip_prefix("---\n").or_else(|| rest.strip_prefix("---\r\n")) {
        Some(after) => after,
        None => return (None, rest),
    };

    let mut offset = 0;
    for line in after_open.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let block = &after_open[..offset];
            let body = &after_open[offset + line.len()..];
            return (Some(block), body);
        }
        offset += line.len();
    }

    // Unterminated fence: not front matter after all
    (None, rest)
}

/// Populate page title and og/twitter head tags from parsed front matter.
///
/// The recognized keys and the produced property names mirror the page's
/// published head-tag surface, quirks included (`og.url` becomes `og:site`,
/// `twitter.site` becomes `twitter:site_name`, and the twitter image card
/// reuses `og.image.url`).
pub fn apply_front_matter(page: &mut Page, matter: &Value) {
    if let Some(title) = matter.get("title").and_then(Value::as_str) {
        page.title = Some(title.to_string());
        page.push_meta(create_meta_tag("og:title", title));
        page.push_meta(create_meta_tag("twitter:title", title));
    }

    if let Some(og) = matter.get("og") {
        if let Some(desc) = scalar(og.get("description")) {
            page.push_meta(create_meta_tag("og:description", &desc));
            page.push_meta(create_meta_tag("twitter:description", &desc));
        }
        if let Some(url) = scalar(og.get("url")) {
            page.push_meta(create_meta_tag("og:site", url));
        }
        if let Some(name) = scalar(og.get("site_name")) {
            page.push_meta(create_meta_tag("og:site_name", name));
        }
        if let Some(image) = og.get("image") {
            if let Some(url) = scalar(image.get("url")) {
                page.push_meta(create_meta_tag("og:image:url", url));
            }
            if let Some(width) = scalar(image.get("width")) {
                page.push_meta(create_meta_tag("og:image:width", width));
            }
            if let Some(height) = scalar(image.get("height")) {
                page.push_meta(create_meta_tag("og:image:height", height));
            }
            if let Some(alt) = scalar(image.get("alt")) {
                page.push_meta(create_meta_tag("og:image:alt", alt));
            }
        }
    }

    if let Some(twitter) = matter.get("twitter") {
        if let Some(site) = scalar(twitter.get("site")) {
            page.push_meta(create_meta_tag("twitter:site_name", site));
        }
        if let Some(domain) = scalar(twitter.get("domain")) {
            page.push_meta(create_meta_tag("twitter:domain", domain));
        }
        if let Some(url) = scalar(matter.pointer("/og/image/url")) {
            page.push_meta(create_meta_tag("twitter:image", url));
            page.push_meta(create_meta_tag("twitter:card", "summary_large_image"));
        }
    }

    page.push_meta(create_meta_tag(
        "article:published_time",
        Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    ));
}

/// String or numeric front matter value, rendered to a string.
fn scalar(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Render markdown to HTML, routing fenced code blocks through the
/// highlighter. Unhighlightable blocks are re-emitted as plain fences so the
/// HTML writer escapes them normally.
fn render_markdown(text: &str, highlighter: &Highlighter) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let mut events: Vec<Event> = Vec::new();
    let mut code_lang: Option<String> = None;
    let mut code_buf = String::new();

    for event in Parser::new_ext(text, options) {
        match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
                let lang = info.split(|c: char| c.is_whitespace() || c == ',').next();
                code_lang = Some(lang.unwrap_or_default().to_string());
                code_buf.clear();
            }
            Event::Text(text) if code_lang.is_some() => {
                code_buf.push_str(&text);
            }
            Event::End(TagEnd::CodeBlock) if code_lang.is_some() => {
                let lang = code_lang.take().unwrap_or_default();
                match highlighter.highlight_snippet(&code_buf, &lang) {
                    Some(highlighted) => events.push(Event::Html(highlighted.into())),
                    None => {
                        events.push(Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(
                            lang.into(),
                        ))));
                        events.push(Event::Text(code_buf.clone().into()));
                        events.push(Event::End(TagEnd::CodeBlock));
                    }
                }
            }
            other => events.push(other),
        }
    }

    let mut out = String::new();
    html::push_html(&mut out, events.into_iter());
    out
}
