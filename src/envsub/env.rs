//! Environment bindings used to resolve variable references.
//!
//! The interpolator only ever reads from an [`Environment`]. The binding used
//! by the CLI is a [`VariableContext`], which layers explicit overrides over
//! the process environment over values loaded from env files.

use std::collections::HashMap;

/// Read-only lookup of variable values.
pub trait Environment {
    /// Look up a variable. `None` means the variable is unbound.
    fn lookup(&self, name: &str) -> Option<String>;
}

impl Environment for HashMap<String, String> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// The live process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn lookup(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Layered variable sources.
///
/// Variables are resolved in priority order:
/// 1. Overrides given on the command line (highest priority)
/// 2. The process environment, when enabled
/// 3. Values loaded from env files (lowest priority)
#[derive(Debug, Default)]
pub struct VariableContext {
    /// `--var KEY=VALUE` overrides
    pub overrides: HashMap<String, String>,

    /// Values merged from `--env-file` files
    pub env_files: HashMap<String, String>,

    use_process_env: bool,
}

impl VariableContext {
    /// Create an empty context that does not consult the process environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Also resolve variables from the process environment.
    pub fn with_process_env(mut self) -> Self {
        self.use_process_env = true;
        self
    }

    /// Set the command-line overrides.
    pub fn with_overrides(mut self, overrides: HashMap<String, String>) -> Self {
        self.overrides = overrides;
        self
    }

    /// Merge values from an env file. Later files win over earlier ones.
    pub fn merge_env_file(&mut self, vars: HashMap<String, String>) {
        self.env_files.extend(vars);
    }
}

impl Environment for VariableContext {
    fn lookup(&self, name: &str) -> Option<String> {
        if let Some(value) = self.overrides.get(name) {
            return Some(value.clone());
        }
        if self.use_process_env {
            if let Some(value) = ProcessEnv.lookup(name) {
                return Some(value);
            }
        }
        self.env_files.get(name).cloned()
    }
}
