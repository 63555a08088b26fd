//! Line-oriented command scripts driving a single stack
//!
//! Used by the `gss` CLI. A script is one command per line:
//!
//! ```text
//! push <value> [parent ...]
//! insert <parent> <value>
//! edge <parent> <child>
//! pop <parent>
//! top
//! find <value>
//! empty
//! dump
//! ```
//!
//! Values are whitespace-free strings. `#` starts a comment.

use crate::graph::GraphStructuredStack;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::warn;

/// The walk-through run by `gss demo`
pub const DEMO: &str = "\
# two alternatives grow from state 1
push 1
push 2 1
push 3 1
top
# both alternatives reach state 3
edge 2 3
dump
# retract the most recent branch under 1
pop 1
dump
find 3
";

/// Errors raised while reading a script
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: unknown command '{command}'")]
    UnknownCommand { line: usize, command: String },

    #[error("line {line}: '{command}' expects {expected}")]
    Arity {
        line: usize,
        command: &'static str,
        expected: &'static str,
    },
}

/// A single script command
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Push { value: String, parents: Vec<String> },
    Insert { parent: String, value: String },
    Edge { parent: String, child: String },
    Pop { parent: String },
    Top,
    Find { value: String },
    Empty,
    Dump,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Push { .. } => "push",
            Command::Insert { .. } => "insert",
            Command::Edge { .. } => "edge",
            Command::Pop { .. } => "pop",
            Command::Top => "top",
            Command::Find { .. } => "find",
            Command::Empty => "empty",
            Command::Dump => "dump",
        }
    }
}

/// A command together with its 1-based source line
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Line {
    pub number: usize,
    pub command: Command,
}

/// Parse a whole script; nothing is executed if any line is malformed
pub fn parse(source: &str) -> Result<Vec<Line>, ParseError> {
    let mut lines = Vec::new();

    for (i, raw) in source.lines().enumerate() {
        let number = i + 1;
        let text = raw.split('#').next().unwrap_or_default();
        let words: Vec<&str> = text.split_whitespace().collect();
        let Some((&head, args)) = words.split_first() else {
            continue;
        };

        let arity = |command: &'static str, expected: &'static str| ParseError::Arity {
            line: number,
            command,
            expected,
        };

        let command = match (head, args) {
            ("push", [value, parents @ ..]) => Command::Push {
                value: value.to_string(),
                parents: parents.iter().map(|p| p.to_string()).collect(),
            },
            ("push", _) => return Err(arity("push", "a value and optional parents")),
            ("insert", [parent, value]) => Command::Insert {
                parent: parent.to_string(),
                value: value.to_string(),
            },
            ("insert", _) => return Err(arity("insert", "<parent> <value>")),
            ("edge", [parent, child]) => Command::Edge {
                parent: parent.to_string(),
                child: child.to_string(),
            },
            ("edge", _) => return Err(arity("edge", "<parent> <child>")),
            ("pop", [parent]) => Command::Pop {
                parent: parent.to_string(),
            },
            ("pop", _) => return Err(arity("pop", "<parent>")),
            ("find", [value]) => Command::Find {
                value: value.to_string(),
            },
            ("find", _) => return Err(arity("find", "<value>")),
            ("top", []) => Command::Top,
            ("top", _) => return Err(arity("top", "no arguments")),
            ("empty", []) => Command::Empty,
            ("empty", _) => return Err(arity("empty", "no arguments")),
            ("dump", []) => Command::Dump,
            ("dump", _) => return Err(arity("dump", "no arguments")),
            (other, _) => {
                return Err(ParseError::UnknownCommand {
                    line: number,
                    command: other.to_string(),
                })
            }
        };

        lines.push(Line { number, command });
    }

    Ok(lines)
}

/// Outcome of running a script
#[derive(Debug, Default)]
pub struct Report {
    /// One JSON object per executed line
    pub outputs: Vec<Value>,
    /// Number of lines whose operation failed
    pub failures: usize,
}

/// A stack of string values plus the commands that drive it
#[derive(Default)]
pub struct Session {
    gss: GraphStructuredStack<String>,
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    pub fn stack(&self) -> &GraphStructuredStack<String> {
        &self.gss
    }

    /// Execute one command, returning its JSON result
    pub fn execute(&mut self, command: &Command) -> crate::Result<Value> {
        let gss = &mut self.gss;

        let value = match command {
            Command::Push { value, parents } => {
                let ids = parents
                    .iter()
                    .map(|p| gss.find(p.as_str()))
                    .collect::<crate::Result<Vec<_>>>()?;
                gss.push(value.clone(), &ids)?;
                json!({"status": "ok", "op": "push", "value": value, "parents": parents})
            }
            Command::Insert { parent, value } => {
                let parent_id = gss.find(parent.as_str())?;
                gss.insert(parent_id, value.clone())?;
                json!({"status": "ok", "op": "insert", "parent": parent, "value": value})
            }
            Command::Edge { parent, child } => {
                let parent_id = gss.find(parent.as_str())?;
                let child_id = gss.find(child.as_str())?;
                gss.add_edge(parent_id, child_id)?;
                json!({"status": "ok", "op": "edge", "parent": parent, "child": child})
            }
            Command::Pop { parent } => {
                let parent_id = gss.find(parent.as_str())?;
                let removed = gss.pop(parent_id)?;
                let deleted = !gss.contains(removed.as_str());
                json!({
                    "status": "ok",
                    "op": "pop",
                    "parent": parent,
                    "removed": removed,
                    "deleted": deleted
                })
            }
            Command::Top => {
                json!({"status": "ok", "op": "top", "value": gss.top()?})
            }
            Command::Find { value } => {
                let id = gss.find(value.as_str())?;
                json!({
                    "status": "ok",
                    "op": "find",
                    "value": value,
                    "children": gss.children(id)?
                })
            }
            Command::Empty => {
                json!({"status": "ok", "op": "empty", "empty": gss.is_empty()})
            }
            Command::Dump => {
                let nodes = gss.snapshot();
                json!({"status": "ok", "op": "dump", "count": nodes.len(), "nodes": nodes})
            }
        };

        Ok(value)
    }

    /// Execute every line, recording failures and carrying on
    pub fn run(&mut self, lines: &[Line]) -> Report {
        let mut report = Report::default();

        for line in lines {
            match self.execute(&line.command) {
                Ok(value) => report.outputs.push(value),
                Err(e) => {
                    warn!(line = line.number, op = line.command.name(), error = %e, "command failed");
                    report.failures += 1;
                    report.outputs.push(json!({
                        "status": "error",
                        "line": line.number,
                        "op": line.command.name(),
                        "message": e.to_string()
                    }));
                }
            }
        }

        report
    }
}
