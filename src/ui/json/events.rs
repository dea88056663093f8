//! Shared JSON event types for consistent CLI output.
//!
//! Every line written in `--json` mode is one of these events.

use std::path::Path;

use serde::Serialize;

/// One harvested file, in output order.
#[derive(Debug, Clone, Serialize)]
pub struct FileEvent<'a> {
    pub event: &'static str,
    pub entity: &'a str,
    pub tech: &'a str,
    pub level: &'a str,
    pub path: &'a Path,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contents: Option<String>,
}

impl<'a> FileEvent<'a> {
    pub fn new(entity: &'a str, tech: &'a str, level: &'a str, path: &'a Path) -> Self {
        Self {
            event: "file",
            entity,
            tech,
            level,
            path,
            contents: None,
        }
    }

    pub fn with_contents(mut self, contents: String) -> Self {
        self.contents = Some(contents);
        self
    }
}

/// One cell of the dependency closure, in output order.
#[derive(Debug, Clone, Serialize)]
pub struct CellEvent<'a> {
    pub event: &'static str,
    pub entity: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tech: Option<&'a str>,
}

impl<'a> CellEvent<'a> {
    pub fn new(entity: &'a str, tech: Option<&'a str>) -> Self {
        Self {
            event: "cell",
            entity,
            tech,
        }
    }
}

/// Non-fatal problem.
#[derive(Debug, Clone, Serialize)]
pub struct WarningEvent<'a> {
    pub event: &'static str,
    pub command: &'a str,
    pub message: String,
}

impl<'a> WarningEvent<'a> {
    pub fn new(command: &'a str, message: impl Into<String>) -> Self {
        Self {
            event: "warning",
            command,
            message: message.into(),
        }
    }
}

/// Event emitted when a command completes successfully.
#[derive(Debug, Clone, Serialize)]
pub struct DoneEvent<'a> {
    pub event: &'static str,
    pub command: &'a str,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl<'a> DoneEvent<'a> {
    pub fn new(command: &'a str, count: usize) -> Self {
        Self {
            event: "done",
            command,
            count,
            duration_ms: None,
        }
    }

    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }
}

/// Event emitted when a command fails.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorEvent<'a> {
    pub event: &'static str,
    pub command: &'a str,
    pub code: &'a str,
    pub message: String,
}

impl<'a> ErrorEvent<'a> {
    pub fn new(command: &'a str, code: &'a str, message: impl Into<String>) -> Self {
        Self {
            event: "error",
            command,
            code,
            message: message.into(),
        }
    }
}
