//! Client for the embedded Lua runtime.
//!
//! The runtime is a sandboxed interpreter (math/table/string libraries only,
//! no io/os) reachable exclusively through evaluation calls. Plot drawing and
//! the dataset live in Lua packages: built-in ones are compiled into the
//! binary, and a configured package directory can shadow or extend them.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use mlua::{Function, Lua, LuaOptions, StdLib};

use crate::app::error::{AppError, Result};
use crate::app::theme::Theme;

/// Packages shipped with the binary. `svgplot` is installable like any
/// downloaded package; `datasets` is preinstalled (see `RuntimeClient::new`).
const BUILTIN_PACKAGES: &[(&str, &str)] = &[
    ("svgplot", include_str!("../../assets/packages/svgplot.lua")),
    ("datasets", include_str!("../../assets/packages/datasets.lua")),
];

/// Construction-time configuration for the runtime.
#[derive(Debug, Clone, Default)]
pub struct RuntimeConfig {
    /// Directory searched for `<name>.lua` before the built-in registry.
    pub package_dir: Option<PathBuf>,
}

/// Owned handle to one runtime instance. Passed by reference to whatever
/// needs evaluation capability; there is no ambient global.
pub struct RuntimeClient {
    lua: Lua,
    config: RuntimeConfig,
    /// Installed package sources, keyed by name. Installing makes a package
    /// available; `library` actually loads it into the global environment.
    installed: HashMap<String, String>,
    loaded: HashSet<String>,
}

impl RuntimeClient {
    /// Construct and initialize the sandboxed runtime.
    pub fn new(config: RuntimeConfig) -> Result<Self> {
        let lua = Lua::new_with(
            StdLib::MATH | StdLib::TABLE | StdLib::STRING,
            LuaOptions::default(),
        )
        .map_err(|e| AppError::RuntimeInit(e.to_string()))?;

        let mut installed = HashMap::new();
        // datasets ships preloaded into the install set, like a base package
        if let Some((name, source)) = BUILTIN_PACKAGES.iter().find(|(n, _)| *n == "datasets") {
            installed.insert(name.to_string(), source.to_string());
        }

        Ok(Self {
            lua,
            config,
            installed,
            loaded: HashSet::new(),
        })
    }

    /// Install packages by name: the configured package directory wins over
    /// the built-in registry. Installing does not load anything yet.
    pub fn install_packages(&mut self, names: &[&str]) -> Result<()> {
        for name in names {
            let source = self.resolve_package(name)?;
            self.installed.insert(name.to_string(), source);
        }
        Ok(())
    }

    fn resolve_package(&self, name: &str) -> Result<String> {
        if let Some(dir) = &self.config.package_dir {
            let path = dir.join(format!("{name}.lua"));
            if path.exists() {
                return fs::read_to_string(&path)
                    .map_err(|e| AppError::ResourceLoad(format!("{}: {e}", path.display())));
            }
        }
        BUILTIN_PACKAGES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, source)| source.to_string())
            .ok_or_else(|| AppError::ResourceLoad(format!("package '{name}' not found")))
    }

    /// Load an installed package into the global environment. Loading an
    /// already-loaded package is a no-op.
    pub fn library(&mut self, name: &str) -> Result<()> {
        if self.loaded.contains(name) {
            return Ok(());
        }
        let source = self
            .installed
            .get(name)
            .cloned()
            .ok_or_else(|| AppError::Evaluation(format!("package '{name}' is not installed")))?;
        self.lua
            .load(source.as_str())
            .set_name(name)
            .exec()
            .map_err(|e| AppError::Evaluation(e.to_string()))?;
        self.loaded.insert(name.to_string());
        Ok(())
    }

    /// Load and execute an arbitrary script file.
    pub fn source(&self, path: &Path) -> Result<()> {
        let code = fs::read_to_string(path)
            .map_err(|e| AppError::ResourceLoad(format!("{}: {e}", path.display())))?;
        self.lua
            .load(code.as_str())
            .set_name(path.to_string_lossy())
            .exec()
            .map_err(|e| AppError::Evaluation(e.to_string()))
    }

    /// Execute a chunk for its side effects.
    pub fn eval(&self, code: &str) -> Result<()> {
        self.lua
            .load(code)
            .exec()
            .map_err(|e| AppError::Evaluation(e.to_string()))
    }

    /// Evaluate a chunk to a single string.
    pub fn eval_string(&self, code: &str) -> Result<String> {
        self.lua
            .load(code)
            .eval::<String>()
            .map_err(|e| AppError::Evaluation(e.to_string()))
    }

    /// Evaluate a chunk to a list of strings.
    pub fn eval_strings(&self, code: &str) -> Result<Vec<String>> {
        self.lua
            .load(code)
            .eval::<Vec<String>>()
            .map_err(|e| AppError::Evaluation(e.to_string()))
    }

    /// Compile a chunk that evaluates to a function, for later parameterized
    /// calls. Arguments are bound at call time, never spliced into source.
    pub fn compile_function(&self, code: &str, name: &str) -> Result<Function> {
        self.lua
            .load(code)
            .set_name(name)
            .eval::<Function>()
            .map_err(|e| AppError::Evaluation(e.to_string()))
    }

    /// Call a compiled function with one string argument, expecting a string.
    pub fn call_str(&self, func: &Function, arg: &str) -> Result<String> {
        func.call::<String>(arg)
            .map_err(|e| AppError::Evaluation(e.to_string()))
    }

    /// Store the theme's color roles as a `theme` table inside the runtime's
    /// own environment, where the plot script picks them up.
    pub fn set_theme(&self, theme: &Theme) -> Result<()> {
        let table = self
            .lua
            .create_table()
            .map_err(|e| AppError::Evaluation(e.to_string()))?;
        for (role, color) in theme.color_roles() {
            table
                .set(role, color)
                .map_err(|e| AppError::Evaluation(e.to_string()))?;
        }
        self.lua
            .globals()
            .set("theme", table)
            .map_err(|e| AppError::Evaluation(e.to_string()))
    }
}
