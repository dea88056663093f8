//! Deps file reading

mod fs_reader;

pub use fs_reader::{parse_deps, FsDepsReader, DEFAULT_READ_CONCURRENCY};
