//! Command handlers

mod cat;
mod closure;
mod resolve;

pub use cat::cmd_cat;
pub use closure::cmd_closure;
pub use resolve::cmd_resolve;

use harvest::config::Config;
use harvest::domain::value_objects::CancelToken;
use harvest::HarvestError;

/// State shared by every command.
pub struct CommandContext {
    pub json: bool,
    pub config: Config,
    pub cancel: CancelToken,
}

impl CommandContext {
    /// Report outcome warnings. Text mode leaves them to the logger.
    pub fn warn_all(&self, command: &str, warnings: &[String]) -> anyhow::Result<()> {
        if !self.json {
            return Ok(());
        }
        for warning in warnings {
            crate::ui::json::emit_event(&crate::ui::json::events::WarningEvent::new(
                command, warning,
            ))?;
        }
        Ok(())
    }
}

/// Stable machine-readable code for an error, used in JSON error events.
pub fn error_code(err: &anyhow::Error) -> &'static str {
    match err.downcast_ref::<HarvestError>() {
        Some(HarvestError::DeclarationFormat { .. }) => "declaration_format",
        Some(HarvestError::ScopeResolution { .. }) => "scope_resolution",
        Some(HarvestError::CyclicDependency { .. }) => "cyclic_dependency",
        Some(HarvestError::NoMatchingFiles { .. }) => "no_matching_files",
        Some(HarvestError::Timeout { .. }) => "timeout",
        Some(HarvestError::EmptyLevels) => "empty_levels",
        Some(HarvestError::EmptyDeclaration) => "empty_declaration",
        Some(HarvestError::EmptyTechnology) => "empty_technology",
        Some(HarvestError::LevelNotFound { .. }) => "level_not_found",
        Some(HarvestError::InvalidEntityName { .. }) => "invalid_entity_name",
        Some(HarvestError::DepsRead { .. }) => "deps_read",
        Some(HarvestError::SourceRead { .. }) => "source_read",
        Some(HarvestError::InvalidConfig { .. }) => "invalid_config",
        Some(HarvestError::Walk { .. }) => "walk",
        Some(HarvestError::Io(_)) => "io",
        Some(HarvestError::Cancelled) => "cancelled",
        None => "error",
    }
}
