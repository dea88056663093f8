//! Resolve Use Case
//!
//! Orchestrates the resolution flow:
//! 1. Walk the levels (bounded wait for the first data)
//! 2. Read deps files in level priority order
//! 3. Parse edges and build the dependency graph
//! 4. Compute the ordered closure for every requested tech
//! 5. Expand techs through aliases and harvest matching files

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;

use crate::domain::entities::FileEntity;
use crate::domain::ports::{DepsReader, LevelSnapshot, LevelWalker, WalkError};
use crate::domain::services::{expand, harvest, parse, DependencyGraph};
use crate::domain::value_objects::{CancelToken, LevelMap};
use crate::error::{HarvestError, HarvestResult};

use super::outcome::{ClosureOutcome, ResolveOutcome};
use super::request::ResolveRequest;

/// Resolve use case, parameterized by its ports.
pub struct ResolveUseCase<LW, DR>
where
    LW: LevelWalker + 'static,
    DR: DepsReader,
{
    walker: Arc<LW>,
    reader: DR,
    cancel: CancelToken,
}

impl<LW, DR> ResolveUseCase<LW, DR>
where
    LW: LevelWalker + 'static,
    DR: DepsReader,
{
    pub fn new(walker: LW, reader: DR) -> Self {
        Self {
            walker: Arc::new(walker),
            reader,
            cancel: CancelToken::new(),
        }
    }

    /// Share a cancellation token with the caller (e.g. a Ctrl-C handler).
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Resolve a declaration into ordered files.
    ///
    /// Finding no files is not an error: the outcome is empty and carries a
    /// warning.
    pub fn resolve(&self, request: &ResolveRequest) -> HarvestResult<ResolveOutcome> {
        let ClosureOutcome {
            closure,
            snapshot,
            mut warnings,
        } = self.closure(request)?;

        let expanded = expand(&closure, &request.tech_aliases);
        let files = harvest(&snapshot, &request.levels, &expanded);
        self.check_cancelled()?;

        if files.is_empty() {
            let warning = HarvestError::NoMatchingFiles {
                levels: request.levels.clone(),
            }
            .to_string();
            log::warn!("{}", warning);
            warnings.push(warning);
        } else {
            log::info!(
                "resolved {} cells into {} files",
                closure.len(),
                files.len()
            );
        }

        Ok(ResolveOutcome {
            files,
            closure,
            warnings,
        })
    }

    /// Compute the ordered closure without matching files.
    pub fn closure(&self, request: &ResolveRequest) -> HarvestResult<ClosureOutcome> {
        validate(request)?;
        self.check_cancelled()?;

        let snapshot = self.walk(request)?;
        let warnings: Vec<String> = snapshot
            .missing
            .iter()
            .map(|level| format!("level not found: {}", level))
            .collect();
        let files = snapshot.files;
        self.check_cancelled()?;

        let deps_files = deps_files_by_priority(&files, &request.levels);
        log::info!(
            "walked {} levels: {} files, {} deps files",
            request.levels.len(),
            files.len(),
            deps_files.len()
        );

        let records = self.reader.read(&deps_files, &self.cancel)?;
        self.check_cancelled()?;

        let edges = parse(&records)?;
        let graph = DependencyGraph::build(&edges);
        let closure = graph.closure_of_many(&request.declaration, &request.techs)?;
        log::info!(
            "closure of {} targets: {} cells",
            request.declaration.len(),
            closure.len()
        );

        Ok(ClosureOutcome {
            closure,
            snapshot: files,
            warnings,
        })
    }

    /// Walk the levels on a separate thread.
    ///
    /// The timeout only covers the wait for the first sign of data; once the
    /// walker reports progress it runs to completion. On timeout the walker
    /// is told to stop at its next progress report.
    fn walk(&self, request: &ResolveRequest) -> HarvestResult<LevelSnapshot> {
        let walker = Arc::clone(&self.walker);
        let levels = request.levels.clone();
        let config: LevelMap = request.level_config.clone();
        let cancel = self.cancel.clone();
        let stop = Arc::new(AtomicBool::new(false));
        let stop_walker = Arc::clone(&stop);
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let reported = AtomicBool::new(false);
            let progress_tx = tx.clone();
            let progress = || {
                if !reported.swap(true, Ordering::Relaxed) {
                    // Receiver may be gone after a timeout
                    let _ = progress_tx.send(WalkMessage::Progress);
                }
                !(stop_walker.load(Ordering::Relaxed) || cancel.is_cancelled())
            };
            let result = walker.walk_with_progress(&levels, &config, &progress);
            let _ = tx.send(WalkMessage::Done(result));
        });

        let first = if request.walk_timeout.is_zero() {
            rx.recv().map_err(|_| RecvTimeoutError::Disconnected)
        } else {
            rx.recv_timeout(request.walk_timeout)
        };

        let mut message = match first {
            Ok(message) => message,
            Err(RecvTimeoutError::Timeout) => {
                stop.store(true, Ordering::Relaxed);
                return Err(HarvestError::Timeout {
                    waited: request.walk_timeout,
                });
            }
            Err(RecvTimeoutError::Disconnected) => return Err(walker_gone()),
        };

        loop {
            match message {
                WalkMessage::Done(result) => return result.map_err(walk_error),
                WalkMessage::Progress => {
                    log::trace!("level walk produced data");
                    message = rx.recv().map_err(|_| walker_gone())?;
                }
            }
        }
    }

    fn check_cancelled(&self) -> HarvestResult<()> {
        if self.cancel.is_cancelled() {
            return Err(HarvestError::Cancelled);
        }
        Ok(())
    }
}

fn validate(request: &ResolveRequest) -> HarvestResult<()> {
    if request.levels.is_empty() {
        return Err(HarvestError::EmptyLevels);
    }
    if request.declaration.is_empty() {
        return Err(HarvestError::EmptyDeclaration);
    }
    if request.techs.is_empty() || request.techs.iter().any(|t| t.trim().is_empty()) {
        return Err(HarvestError::EmptyTechnology);
    }
    Ok(())
}

enum WalkMessage {
    Progress,
    Done(Result<LevelSnapshot, WalkError>),
}

fn walker_gone() -> HarvestError {
    HarvestError::Walk {
        message: "level walker stopped without a result".to_string(),
    }
}

fn walk_error(err: WalkError) -> HarvestError {
    match err {
        WalkError::LevelNotFound { path } => HarvestError::LevelNotFound { path },
        WalkError::Stopped => HarvestError::Cancelled,
        other => HarvestError::Walk {
            message: other.to_string(),
        },
    }
}

/// Deps files stable-sorted by the position of their level in `levels`.
fn deps_files_by_priority(files: &[FileEntity], levels: &[String]) -> Vec<FileEntity> {
    let mut position: HashMap<&str, usize> = HashMap::new();
    for (idx, level) in levels.iter().enumerate() {
        position.entry(level.as_str()).or_insert(idx);
    }

    let mut deps: Vec<FileEntity> = files
        .iter()
        .filter(|f| f.is_deps())
        .cloned()
        .collect();
    deps.sort_by_key(|f| position.get(f.level.as_str()).copied().unwrap_or(usize::MAX));
    deps
}
