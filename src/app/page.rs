use std::fmt::Display;

/// One `<meta property=... content=.../>` head element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaTag {
    pub property: String,
    pub content: String,
}

impl MetaTag {
    pub fn to_html(&self) -> String {
        format!(
            "<meta property=\"{}\" content=\"{}\"/>",
            escape_attr(&self.property),
            escape_attr(&self.content)
        )
    }
}

/// Build a head-tag descriptor from a property name and a value.
///
/// Pure construction; appending the tag to a page is the caller's job.
/// Accepts anything printable so numeric values (image widths, heights)
/// work without a cast at the call site.
pub fn create_meta_tag(property: &str, content: impl Display) -> MetaTag {
    MetaTag {
        property: property.to_string(),
        content: content.to_string(),
    }
}

/// In-memory model of the displayed page: title, head tags and the
/// content container the document renderer splices rendered HTML into.
#[derive(Debug, Default)]
pub struct Page {
    pub title: Option<String>,
    pub head: Vec<MetaTag>,
    pub content: String,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_meta(&mut self, tag: MetaTag) {
        self.head.push(tag);
    }

    pub fn append_content(&mut self, html: &str) {
        self.content.push_str(html);
    }

    /// Serialize the whole page to an HTML document.
    pub fn to_html(&self) -> String {
        let mut out = String::with_capacity(self.content.len() + 256);
        out.push_str("<html>\n<head>\n");
        if let Some(title) = &self.title {
            out.push_str(&format!("<title>{}</title>\n", escape_attr(title)));
        }
        for tag in &self.head {
            out.push_str(&tag.to_html());
            out.push('\n');
        }
        out.push_str("</head>\n<body>\n");
        out.push_str(&self.content);
        out.push_str("\n</body>\n</html>\n");
        out
    }
}

fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
