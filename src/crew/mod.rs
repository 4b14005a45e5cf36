//! Crew configuration: the agent roles, tasks, and per-task actions a
//! pipeline run is built from.
//!
//! A crew is either the built-in digital-twin crew (`builtin::digital_twin`)
//! or deserialized from a TOML file pointed at by `NETTWIN_CREW_PATH`.

pub mod builtin;

use std::path::Path;

use anyhow::{Context as _, Result, bail};
use serde::{Deserialize, Serialize};

/// A declared agent capability. Declaration only; execution belongs to the
/// orchestration backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    WebSearch,
}

/// One agent role in the crew.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentSpec {
    /// Unique name, referenced by tasks.
    pub name: String,
    pub role: String,
    pub goal: String,
    pub backstory: String,
    /// Ask the backend for chatty per-step output.
    #[serde(default)]
    pub verbose: bool,
    /// Let the backend carry context between tasks.
    #[serde(default)]
    pub memory: bool,
    #[serde(default)]
    pub tools: Vec<ToolKind>,
    /// Pause for operator confirmation before this agent acts.
    #[serde(default)]
    pub human_in_the_loop: bool,
}

/// One shell step a task may run on the host.
///
/// ```toml
/// [[tasks.actions]]
/// command = "ifconfig"
/// log_output = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Action {
    /// Complete shell command line, run via `sh -c`.
    pub command: String,
    /// Persist this action's captured output to the logbook.
    #[serde(default)]
    pub log_output: bool,
}

/// One unit of crew work, assigned to an agent by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskSpec {
    pub name: String,
    pub description: String,
    pub expected_output: String,
    /// Name of the agent that owns this task.
    pub agent: String,
    #[serde(default)]
    pub tools: Vec<ToolKind>,
    /// Host-executable steps. Last field: emits as a trailing TOML array of
    /// tables.
    #[serde(default)]
    pub actions: Vec<Action>,
}

/// Task sequencing mode. The backend owns the semantics; the host
/// implementation walks tasks in declaration order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessKind {
    #[default]
    Sequential,
}

/// Top-level crew configuration, deserialized from a `.toml` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CrewConfig {
    #[serde(default)]
    pub process: ProcessKind,
    pub agents: Vec<AgentSpec>,
    pub tasks: Vec<TaskSpec>,
}

impl CrewConfig {
    /// Checks cross-references: agent names must be unique and every task
    /// must point at a declared agent.
    ///
    /// # Errors
    ///
    /// Returns an error naming the offending agent or task.
    pub fn validate(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for agent in &self.agents {
            if !seen.insert(agent.name.as_str()) {
                bail!("duplicate agent name: {}", agent.name);
            }
        }
        for task in &self.tasks {
            if !seen.contains(task.agent.as_str()) {
                bail!(
                    "task `{}` references unknown agent `{}`",
                    task.name,
                    task.agent
                );
            }
        }
        Ok(())
    }

    /// Looks up an agent by name.
    pub fn agent(&self, name: &str) -> Option<&AgentSpec> {
        self.agents.iter().find(|a| a.name == name)
    }
}

/// Try to load a crew from `path`. Returns `Ok(Some(config))` on success,
/// `Ok(None)` if the file does not exist, or `Err` for other I/O / parse
/// errors.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or contains
/// invalid TOML.
pub fn try_load_crew(path: &Path) -> Result<Option<CrewConfig>> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(anyhow::Error::new(e)
                .context(format!("failed to read crew file: {}", path.display())));
        }
    };
    let config: CrewConfig = toml::from_str(&content)
        .with_context(|| format!("failed to parse crew file: {}", path.display()))?;
    Ok(Some(config))
}
