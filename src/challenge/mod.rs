//! Turns logged command output into network-analysis challenges.
//!
//! Each rule pairs a command substring with a prompt. A record whose command
//! contains the substring becomes one challenge: the prompt on the first
//! line, the captured output below it. Records that match no rule are
//! skipped without leaving gaps in the numbering.

use crate::logbook::Record;

struct Rule {
    needle: &'static str,
    prompt: &'static str,
}

/// Match order matters: the first rule whose needle appears in the command
/// wins. Matching is case-sensitive.
const RULES: &[Rule] = &[
    Rule {
        needle: "ifconfig",
        prompt: "Analyze the following ifconfig output and identify the IP address:",
    },
    Rule {
        needle: "netstat",
        prompt: "Examine the netstat output and determine the active connections:",
    },
    Rule {
        needle: "hostname",
        prompt: "Given the hostname output, find the machine's name:",
    },
];

/// Renders the challenge for one record, or `None` if no rule matches its
/// command.
pub fn challenge_for(record: &Record) -> Option<String> {
    RULES
        .iter()
        .find(|rule| record.command.contains(rule.needle))
        .map(|rule| format!("{}\n{}", rule.prompt, record.output))
}

/// Generates challenges for every matching record, preserving logbook order.
pub fn generate(records: &[Record]) -> Vec<String> {
    records.iter().filter_map(challenge_for).collect()
}
