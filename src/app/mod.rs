//! Application layer.
//!
//! # Structure
//!
//! - `page.rs` / `slug.rs` - Page head/content model and small text utilities
//! - `theme.rs` - Theme descriptor shared by highlighting and plotting
//! - `render.rs` - Markdown document renderer (front matter, code blocks)
//! - `runtime.rs` - Sandboxed Lua runtime client
//! - `plot.rs` - Region bar-plot renderer on top of the runtime
//! - `reactive.rs` / `views.rs` - Observable cells and their render functions
//! - `state.rs` - Boot sequence coordinator and selection handling

pub mod error;
pub mod page;
pub mod plot;
pub mod reactive;
pub mod render;
pub mod runtime;
pub mod slug;
pub mod state;
pub mod theme;
pub mod views;

// Re-exports for convenient external access
pub use error::{AppError, Result};
pub use page::{MetaTag, Page, create_meta_tag};
pub use plot::PlotRenderer;
pub use reactive::Cell;
pub use runtime::{RuntimeClient, RuntimeConfig};
pub use slug::slugify;
pub use state::{AppState, BootPhase};
pub use theme::Theme;

/// All messages that can be sent through the FLTK channel.
/// Widget callbacks send one of these; the dispatch loop in main handles them.
#[derive(Debug, Clone)]
pub enum Message {
    /// The region popup changed to the given label.
    RegionSelected(String),
}
