//! File stream
//!
//! Restartable sequence over a resolved file list, optionally reading
//! contents as it goes.

use std::fs;
use std::path::PathBuf;

use serde::Serialize;

use crate::domain::entities::FileEntity;
use crate::error::{HarvestError, HarvestResult};

/// One file of the output sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFile {
    /// Base name before the first dot
    pub name: String,
    pub tech: String,
    pub level: String,
    pub path: PathBuf,
    #[serde(skip)]
    pub contents: Option<Vec<u8>>,
}

impl SourceFile {
    fn from_entity(file: &FileEntity, contents: Option<Vec<u8>>) -> Self {
        let name = file
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.split('.').next())
            .unwrap_or_default()
            .to_string();
        Self {
            name,
            tech: file.tech.clone(),
            level: file.level.clone(),
            path: file.path.clone(),
            contents,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileStream {
    files: Vec<FileEntity>,
    read_contents: bool,
}

impl FileStream {
    pub fn new(files: Vec<FileEntity>) -> Self {
        Self {
            files,
            read_contents: true,
        }
    }

    pub fn with_contents(mut self, read: bool) -> Self {
        self.read_contents = read;
        self
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterate from the first file. Each call starts over.
    pub fn iter(&self) -> impl Iterator<Item = HarvestResult<SourceFile>> + '_ {
        self.files.iter().map(move |file| {
            let contents = if self.read_contents {
                Some(fs::read(&file.path).map_err(|e| HarvestError::SourceRead {
                    path: file.path.clone(),
                    message: e.to_string(),
                })?)
            } else {
                None
            };
            Ok(SourceFile::from_entity(file, contents))
        })
    }
}
