//! Value Objects
//!
//! Small immutable types shared by services and ports.

mod cancel_token;
mod config_warning;
mod level_settings;
mod tech_aliases;

pub use cancel_token::CancelToken;
pub use config_warning::ConfigWarning;
pub use level_settings::{is_required, LevelMap, LevelSettings};
pub use tech_aliases::{TechAliasParseError, TechAliases};
