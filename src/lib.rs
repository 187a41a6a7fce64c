//! PlotPad - a small desktop page with a live, runtime-rendered bar plot.
//!
//! The library half holds everything that doesn't touch a window: the page
//! model, the markdown/highlighting pipeline, the embedded Lua runtime, the
//! plot renderer, and the reactive cells the UI binds to. The `ui` module and
//! the binary wire those pieces into an FLTK shell.

pub mod app;
pub mod ui;
