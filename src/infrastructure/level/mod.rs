//! Level walking

mod fs_walker;

pub use fs_walker::{FsLevelWalker, IGNORE_FILE_NAME};
