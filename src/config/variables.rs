//! Assembling the variable context from command-line sources.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::envsub::VariableContext;
use crate::error::{CookedGooseError, Result};

use super::env_file::EnvFileParser;

/// Parse `KEY=VALUE` assignments. Later assignments of the same key win.
///
/// # Errors
///
/// Returns [`CookedGooseError::InvalidVariable`] when an assignment has no
/// `=` or an empty key.
pub fn parse_assignments(assignments: &[String]) -> Result<HashMap<String, String>> {
    let mut vars = HashMap::new();

    for assignment in assignments {
        let (key, value) = assignment
            .split_once('=')
            .filter(|(key, _)| !key.trim().is_empty())
            .ok_or_else(|| CookedGooseError::InvalidVariable {
                assignment: assignment.clone(),
            })?;
        vars.insert(key.trim().to_string(), value.to_string());
    }

    Ok(vars)
}

/// Where interpolated values come from.
#[derive(Debug, Clone, Default)]
pub struct VariableSources {
    /// Env files, lowest priority, later files win
    pub env_files: Vec<PathBuf>,
    /// `KEY=VALUE` overrides, highest priority
    pub assignments: Vec<String>,
    /// Whether to consult the process environment
    pub process_env: bool,
}

impl VariableSources {
    /// Load every source into a [`VariableContext`].
    pub fn load(&self) -> Result<VariableContext> {
        let overrides = parse_assignments(&self.assignments)?;
        let mut context = VariableContext::new().with_overrides(overrides);
        if self.process_env {
            context = context.with_process_env();
        }

        for path in &self.env_files {
            let vars = EnvFileParser::load(path)?;
            tracing::debug!("Loaded {} variables from {}", vars.len(), path.display());
            context.merge_env_file(vars);
        }

        Ok(context)
    }
}
