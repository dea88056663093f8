//! File system DepsReader implementation
//!
//! Reads `*.deps.json` and `*.deps.yaml` / `*.deps.yml` files on a bounded
//! rayon pool. Results come back in input order.

use std::fs;
use std::path::Path;

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use serde_json::Value;

use crate::domain::entities::{Cell, FileEntity};
use crate::domain::ports::DepsReader;
use crate::domain::services::DepsRecord;
use crate::domain::value_objects::CancelToken;
use crate::error::{HarvestError, HarvestResult};

pub const DEFAULT_READ_CONCURRENCY: usize = 8;

#[derive(Debug, Clone)]
pub struct FsDepsReader {
    concurrency: usize,
}

impl FsDepsReader {
    pub fn new(concurrency: usize) -> Self {
        Self {
            concurrency: concurrency.max(1),
        }
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }
}

impl Default for FsDepsReader {
    fn default() -> Self {
        Self::new(DEFAULT_READ_CONCURRENCY)
    }
}

impl DepsReader for FsDepsReader {
    fn read(&self, files: &[FileEntity], cancel: &CancelToken) -> HarvestResult<Vec<DepsRecord>> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(self.concurrency)
            .build()
            .map_err(|e| HarvestError::Io(std::io::Error::other(e.to_string())))?;

        let records = pool.install(|| {
            files
                .par_iter()
                .map(|file| {
                    if cancel.is_cancelled() {
                        return Err(HarvestError::Cancelled);
                    }
                    read_record(file)
                })
                .collect::<HarvestResult<Vec<_>>>()
        })?;

        log::debug!(
            "read {} deps files with {} workers",
            records.len(),
            self.concurrency
        );
        Ok(records)
    }
}

fn read_record(file: &FileEntity) -> HarvestResult<DepsRecord> {
    let content = fs::read_to_string(&file.path).map_err(|e| HarvestError::DepsRead {
        path: file.path.clone(),
        message: e.to_string(),
    })?;
    let data = parse_deps(&file.path, &file.tech, &content)?;
    Ok(DepsRecord::new(Cell::entity(file.entity.clone()), data).with_source(&file.path))
}

/// Parse deps file content by tech. Blank content is an empty deps list.
pub fn parse_deps(path: &Path, tech: &str, content: &str) -> HarvestResult<Value> {
    if content.trim().is_empty() {
        return Ok(Value::Array(Vec::new()));
    }

    let parsed = match tech {
        "deps.json" => serde_json::from_str::<Value>(content).map_err(|e| e.to_string()),
        "deps.yaml" | "deps.yml" => {
            serde_yaml_ng::from_str::<Value>(content).map_err(|e| e.to_string())
        }
        other => Err(format!("unsupported deps format '{}'", other)),
    };

    parsed.map_err(|message| HarvestError::DepsRead {
        path: path.to_path_buf(),
        message,
    })
}
