//! Orchestration seam between a crew configuration and whatever runs it.
//!
//! The `Orchestrator` trait is the whole contract: hand a crew and its
//! kickoff inputs to an implementation, get back the pipeline's final result
//! text plus the command outputs that must be persisted. `HostOrchestrator`
//! is the shipped implementation; it executes the deterministic subset (each
//! task's declared shell actions) and reports reasoning tasks as skipped.

use std::collections::BTreeMap;

use anyhow::{Context as _, Result};
use rusqlite::Connection;

use crate::crew::CrewConfig;
use crate::{logbook, runner};

/// Named inputs a pipeline run is parameterized with (`topic`, ...).
pub type KickoffInputs = BTreeMap<String, String>;

/// One command output the pipeline wants persisted.
#[derive(Debug, Clone)]
pub struct LoggedCommand {
    pub command: String,
    pub output: String,
}

/// What a pipeline run hands back.
#[derive(Debug, Clone)]
pub struct KickoffOutcome {
    /// Opaque final result text, printed verbatim.
    pub result: String,
    /// Command outputs to persist, in execution order.
    pub logged: Vec<LoggedCommand>,
}

/// Runs a crew's task pipeline.
///
/// Implementations own sequencing, delegation, and any agent reasoning; the
/// caller owns persistence of the returned command outputs.
pub trait Orchestrator {
    /// Runs the pipeline to completion and returns its outcome.
    ///
    /// # Errors
    ///
    /// Returns an error if the crew is invalid or the pipeline cannot run.
    fn kickoff(&self, crew: &CrewConfig, inputs: &KickoffInputs) -> Result<KickoffOutcome>;
}

/// Executes each task's declared shell actions in declaration order.
///
/// A non-zero action exit does not abort the run; the exit code goes into
/// the result text and flagged output is still handed back for persistence.
/// Tasks with no actions produce a skip note and nothing to persist.
#[derive(Debug, Default)]
pub struct HostOrchestrator {
    /// Emit `[nettwin]` progress lines to stderr while running.
    pub verbose: bool,
}

impl Orchestrator for HostOrchestrator {
    fn kickoff(&self, crew: &CrewConfig, inputs: &KickoffInputs) -> Result<KickoffOutcome> {
        crew.validate()?;

        let topic = inputs.get("topic").map_or("untitled run", String::as_str);
        let mut report = vec![format!("Pipeline run: {topic}")];
        let mut logged = Vec::new();

        for task in &crew.tasks {
            let role = crew
                .agent(&task.agent)
                .map_or(task.agent.as_str(), |a| a.role.as_str());
            report.push(String::new());
            report.push(format!("== {} ({role}) ==", task.name));

            if task.actions.is_empty() {
                report.push(
                    "skipped: no executable actions; this step needs an agent backend"
                        .to_string(),
                );
            }
            for action in &task.actions {
                if self.verbose {
                    eprintln!("[nettwin] {}: running `{}`", task.name, action.command);
                }
                let result = runner::execute_shell(&action.command)
                    .with_context(|| format!("run action `{}`", action.command))?;
                let note = if action.log_output { ", logged" } else { "" };
                report.push(format!(
                    "$ {} (exit {}{note})",
                    action.command, result.exit_code
                ));
                if action.log_output {
                    logged.push(LoggedCommand {
                        command: action.command.clone(),
                        output: result.combined,
                    });
                }
            }

            report.push(format!("expected: {}", task.expected_output));
        }

        report.push(String::new());
        report.push(format!(
            "{} task(s) processed, {} command output(s) logged.",
            crew.tasks.len(),
            logged.len()
        ));

        Ok(KickoffOutcome {
            result: report.join("\n"),
            logged,
        })
    }
}

/// Drives `kickoff`, then appends every logged pair to the logbook in
/// execution order. Returns the pipeline's result text.
///
/// Each append commits on its own, so a failure partway through keeps the
/// records already written.
///
/// # Errors
///
/// Returns an error if the kickoff fails or a record cannot be appended.
pub fn run_pipeline(
    orch: &dyn Orchestrator,
    crew: &CrewConfig,
    inputs: &KickoffInputs,
    conn: &Connection,
) -> Result<String> {
    let outcome = orch.kickoff(crew, inputs)?;
    for entry in &outcome.logged {
        logbook::append(conn, &entry.command, &entry.output)?;
    }
    Ok(outcome.result)
}
