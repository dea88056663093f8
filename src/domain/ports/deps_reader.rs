//! DepsReader port
//!
//! Loads deps files into raw records ready for edge parsing.

use crate::domain::entities::FileEntity;
use crate::domain::services::DepsRecord;
use crate::domain::value_objects::CancelToken;
use crate::error::HarvestResult;

pub trait DepsReader: Send + Sync {
    /// Read `files` and return one record per file, in input order.
    ///
    /// Stops early with `HarvestError::Cancelled` once `cancel` is set.
    fn read(&self, files: &[FileEntity], cancel: &CancelToken) -> HarvestResult<Vec<DepsRecord>>;
}
