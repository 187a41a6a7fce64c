//! Boot sequence coordinator.
//!
//! The startup steps run strictly in order because each one depends on the
//! side effects of the previous: runtime construction, package installs,
//! theme injection, region discovery, initial plot. The phase machine guards
//! the selection handler, which can fire at any time once the UI exists.

use crate::app::error::{AppError, Result};
use crate::app::plot::{PlotRenderer, REGION_QUERY};
use crate::app::reactive::Cell;
use crate::app::runtime::{RuntimeClient, RuntimeConfig};
use crate::app::theme::Theme;

/// Startup progress. Selections are only honored in `Ready`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootPhase {
    Idle,
    Loading,
    RuntimeReady,
    LibrariesReady,
    Ready,
    Failed,
}

pub struct AppState {
    pub phase: BootPhase,
    pub theme: Theme,

    // The three reactive anchors the UI binds to.
    pub message: Cell<Option<String>>,
    pub regions: Cell<Vec<String>>,
    pub selected_plot: Cell<Option<String>>,

    runtime: Option<RuntimeClient>,
    plot: Option<PlotRenderer>,
}

impl AppState {
    pub fn new(theme: Theme) -> Self {
        Self {
            phase: BootPhase::Idle,
            theme,
            message: Cell::new(None),
            regions: Cell::new(Vec::new()),
            selected_plot: Cell::new(None),
            runtime: None,
            plot: None,
        }
    }

    /// Run the startup sequence. On failure the phase becomes `Failed` and a
    /// terminal status message is rendered before the error is handed back.
    pub fn boot(&mut self, config: RuntimeConfig) -> Result<()> {
        match self.run_boot(config) {
            Ok(()) => Ok(()),
            Err(e) => {
                self.phase = BootPhase::Failed;
                self.message.set(Some(format!("⚠️ Startup failed: {e}")));
                Err(e)
            }
        }
    }

    fn run_boot(&mut self, config: RuntimeConfig) -> Result<()> {
        self.phase = BootPhase::Loading;
        self.message.set(Some("Loading Lua runtime…".to_string()));

        let mut runtime = RuntimeClient::new(config)?;
        self.phase = BootPhase::RuntimeReady;
        self.message.set(Some("Runtime initialized".to_string()));

        runtime.install_packages(&["svgplot"])?;
        runtime.library("svgplot")?;
        runtime.library("datasets")?;
        runtime.set_theme(&self.theme)?;
        self.phase = BootPhase::LibrariesReady;
        self.message.set(Some("{svgplot} loaded".to_string()));

        let regions = runtime.eval_strings(REGION_QUERY)?;
        let first = regions
            .first()
            .cloned()
            .ok_or_else(|| AppError::Evaluation("dataset has no regions".to_string()))?;
        // the option list must be populated before the first plot write
        self.regions.set(regions);

        let plot = PlotRenderer::new(&runtime)?;
        let svg = plot.render(&runtime, &first)?;
        self.selected_plot.set(Some(svg));

        self.runtime = Some(runtime);
        self.plot = Some(plot);
        self.phase = BootPhase::Ready;
        self.message.set(Some("Ready".to_string()));
        Ok(())
    }

    /// Handle a region selection from the popup.
    ///
    /// Before the boot sequence finishes this is a stale selection and is
    /// rejected. After that, a failed render keeps the previous plot on
    /// screen and surfaces an inline warning instead of aborting.
    pub fn on_region_selected(&mut self, region: &str) -> Result<()> {
        if self.phase != BootPhase::Ready {
            return Err(AppError::StaleSelection(region.to_string()));
        }
        let (runtime, plot) = match (&self.runtime, &self.plot) {
            (Some(runtime), Some(plot)) => (runtime, plot),
            _ => return Err(AppError::StaleSelection(region.to_string())),
        };

        match plot.render(runtime, region) {
            Ok(svg) => {
                self.selected_plot.set(Some(svg));
                Ok(())
            }
            Err(e) => {
                self.message.set(Some(format!("⚠️ Plot failed: {e}")));
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::fs;
    use std::rc::Rc;

    use crate::app::views;

    fn booted_state() -> AppState {
        let mut state = AppState::new(Theme::default());
        state.boot(RuntimeConfig::default()).unwrap();
        state
    }

    #[test]
    fn test_boot_reaches_ready_with_regions_and_initial_plot() {
        let state = booted_state();

        assert_eq!(state.phase, BootPhase::Ready);
        assert_eq!(
            *state.regions.get(),
            vec!["N.Amer", "Europe", "Asia", "S.Amer", "Oceania", "Africa", "Mid.Amer"]
        );
        // the initial plot is rendered for the first region
        let svg = state.selected_plot.get().clone().unwrap();
        assert!(svg.contains(">N.Amer</text>"));
        assert_eq!(state.message.get().as_deref(), Some("Ready"));
    }

    #[test]
    fn test_boot_populates_regions_before_first_plot_write() {
        let order = Rc::new(RefCell::new(Vec::new()));

        let mut state = AppState::new(Theme::default());
        let log = order.clone();
        state.regions.bind(
            |v: &Vec<String>| views::region_menu_markup(v),
            move |v, _| {
                if !v.is_empty() {
                    log.borrow_mut().push("regions");
                }
            },
        );
        let log = order.clone();
        state.selected_plot.bind(
            |v: &Option<String>| views::selected_plot_markup(v),
            move |v, _| {
                if v.is_some() {
                    log.borrow_mut().push("plot");
                }
            },
        );

        state.boot(RuntimeConfig::default()).unwrap();
        assert_eq!(*order.borrow(), vec!["regions", "plot"]);
    }

    #[test]
    fn test_status_messages_advance_in_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut state = AppState::new(Theme::default());
        let log = seen.clone();
        state.message.bind(
            |v: &Option<String>| views::message_markup(v),
            move |_, markup| log.borrow_mut().push(markup.to_string()),
        );

        state.boot(RuntimeConfig::default()).unwrap();
        assert_eq!(
            *seen.borrow(),
            vec![
                "",
                "Loading Lua runtime…",
                "Runtime initialized",
                "{svgplot} loaded",
                "Ready"
            ]
        );
    }

    #[test]
    fn test_selection_before_ready_is_stale() {
        let mut state = AppState::new(Theme::default());
        let err = state.on_region_selected("Asia").unwrap_err();
        assert!(matches!(err, AppError::StaleSelection(_)));
        assert!(state.selected_plot.get().is_none());
    }

    #[test]
    fn test_selection_after_ready_replaces_plot() {
        let mut state = booted_state();
        let initial = state.selected_plot.get().clone().unwrap();

        state.on_region_selected("Asia").unwrap();
        let updated = state.selected_plot.get().clone().unwrap();
        assert_ne!(initial, updated);
        assert!(updated.contains(">Asia</text>"));
    }

    #[test]
    fn test_failed_selection_keeps_previous_plot_and_warns() {
        let mut state = booted_state();
        let before = state.selected_plot.get().clone();

        let err = state.on_region_selected("Atlantis").unwrap_err();
        assert!(matches!(err, AppError::Evaluation(_)));
        assert_eq!(*state.selected_plot.get(), before);
        assert!(state.message.get().as_deref().unwrap().contains("Plot failed"));
        // a bad selection does not knock the app out of Ready
        assert_eq!(state.phase, BootPhase::Ready);
        state.on_region_selected("Europe").unwrap();
    }

    #[test]
    fn test_boot_failure_sets_failed_phase_and_terminal_message() {
        // a broken svgplot package in the package dir shadows the builtin
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("svgplot.lua"), "this is not lua").unwrap();

        let mut state = AppState::new(Theme::default());
        let err = state
            .boot(RuntimeConfig {
                package_dir: Some(dir.path().to_path_buf()),
            })
            .unwrap_err();

        assert!(matches!(err, AppError::Evaluation(_)));
        assert_eq!(state.phase, BootPhase::Failed);
        assert!(state.message.get().as_deref().unwrap().contains("Startup failed"));
        // and selections stay rejected afterwards
        assert!(matches!(
            state.on_region_selected("Asia"),
            Err(AppError::StaleSelection(_))
        ));
    }
}
