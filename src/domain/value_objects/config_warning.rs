//! Configuration warning value object.

use std::path::PathBuf;

/// Unknown key found while loading a config file. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    /// Last segment of the unknown key path, e.g. `read_concurency`
    pub key: String,
    pub file: PathBuf,
    /// 1-indexed line of the key, when it can be located
    pub line: Option<usize>,
    /// Closest known key, if one is near enough
    pub suggestion: Option<String>,
}
