//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up and merges
//! command-line input over configuration.

use crate::application::{ResolveRequest, ResolveUseCase};
use crate::config::Config;
use crate::domain::entities::Cell;
use crate::domain::value_objects::CancelToken;
use crate::error::{HarvestError, HarvestResult};
use crate::infrastructure::{FsDepsReader, FsLevelWalker};

use super::cli::ResolveArgs;

/// Type alias for the concrete ResolveUseCase with all dependencies
pub type ConcreteResolveUseCase = ResolveUseCase<FsLevelWalker, FsDepsReader>;

/// Create a resolve use case with all dependencies wired up
pub fn create_resolve_use_case(
    config: &Config,
    follow_links: bool,
    cancel: CancelToken,
) -> ConcreteResolveUseCase {
    let walker = FsLevelWalker::new().follow_links(follow_links);
    let reader = FsDepsReader::new(config.resolve.read_concurrency);
    ResolveUseCase::new(walker, reader).with_cancel(cancel)
}

/// Build a request from CLI arguments, falling back to configuration.
///
/// CLI levels replace configured levels; CLI aliases override configured
/// aliases for the same tech.
pub fn build_request(args: &ResolveArgs, config: &Config) -> HarvestResult<ResolveRequest> {
    let levels = if args.levels.is_empty() {
        config.levels.clone()
    } else {
        args.levels.clone()
    };

    let declaration = args
        .entities
        .iter()
        .map(|raw| {
            Cell::parse(raw).map_err(|e| HarvestError::InvalidEntityName {
                name: raw.clone(),
                message: e.reason,
            })
        })
        .collect::<HarvestResult<Vec<_>>>()?;

    let techs: Vec<String> = args
        .techs
        .iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();

    let mut aliases = config.tech_aliases.clone();
    aliases.merge(&args.tech_aliases());

    Ok(ResolveRequest::new(levels, declaration, techs)
        .with_aliases(aliases)
        .with_level_config(config.level.clone())
        .with_walk_timeout(config.resolve.walk_timeout()))
}
