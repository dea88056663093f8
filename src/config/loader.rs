//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::ConfigWarning;
use crate::error::{HarvestError, HarvestResult};

use super::types::{Config, Verbosity};

pub const PROJECT_CONFIG_FILE: &str = "harvest.toml";

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> HarvestResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| HarvestError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load from project config, user config, or defaults.
///
/// The first file found wins; env overrides apply on top of it. A file that
/// exists but does not parse is an error.
pub fn load_or_default(project_root: Option<&Path>) -> HarvestResult<(Config, Vec<ConfigWarning>)> {
    let candidates = project_root
        .map(|root| root.join(PROJECT_CONFIG_FILE))
        .into_iter()
        .chain(user_config_path());

    for path in candidates {
        if path.is_file() {
            log::debug!("loading config from {}", path.display());
            let (config, warnings) = load_with_warnings(&path)?;
            return Ok((with_env_overrides(config), warnings));
        }
    }

    Ok((with_env_overrides(Config::default()), Vec::new()))
}

/// Apply environment variable overrides (HARVEST_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    apply_env(config, |key| std::env::var(key).ok())
}

pub(super) fn apply_env(mut config: Config, var: impl Fn(&str) -> Option<String>) -> Config {
    // HARVEST_LEVELS (comma-separated)
    if let Some(levels) = var("HARVEST_LEVELS") {
        let parsed: Vec<String> = levels
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if !parsed.is_empty() {
            config.levels = parsed;
        }
    }

    if let Some(raw) = var("HARVEST_READ_CONCURRENCY") {
        match raw.trim().parse::<usize>() {
            Ok(n) if n > 0 => config.resolve.read_concurrency = n,
            _ => log::warn!("ignoring HARVEST_READ_CONCURRENCY={}: expected a positive integer", raw),
        }
    }

    if let Some(raw) = var("HARVEST_WALK_TIMEOUT_MS") {
        match raw.trim().parse::<u64>() {
            Ok(ms) => config.resolve.walk_timeout_ms = ms,
            Err(_) => log::warn!("ignoring HARVEST_WALK_TIMEOUT_MS={}: expected milliseconds", raw),
        }
    }

    if let Some(raw) = var("HARVEST_VERBOSITY") {
        config.output.verbosity = Verbosity::parse(&raw).unwrap_or_default();
    }

    config
}

/// `$XDG_CONFIG_HOME/harvest/config.toml`, else `~/.config/harvest/config.toml`
fn user_config_path() -> Option<PathBuf> {
    std::env::var("XDG_CONFIG_HOME")
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
        .map(|dir| dir.join("harvest").join("config.toml"))
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

pub(super) fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "levels",
        "tech_aliases",
        "level",
        "required",
        "resolve",
        "read_concurrency",
        "walk_timeout_ms",
        "output",
        "verbosity",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
