//! Resolve Module
//!
//! Turns a declaration into the ordered list of files that implement it.
//!
//! ## Structure
//!
//! - `request` - Input types (`ResolveRequest`)
//! - `outcome` - Result types (`ResolveOutcome`, `ClosureOutcome`)
//! - `use_case` - The pipeline (`ResolveUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use harvest::application::resolve::{ResolveRequest, ResolveUseCase};
//!
//! let use_case = ResolveUseCase::new(FsLevelWalker::new(), FsDepsReader::default());
//! let outcome = use_case.resolve(&ResolveRequest::new(levels, decl, techs))?;
//! ```

mod outcome;
mod request;
mod use_case;

pub use outcome::{ClosureOutcome, ResolveOutcome};
pub use request::{ResolveRequest, DEFAULT_WALK_TIMEOUT};
pub use use_case::ResolveUseCase;
