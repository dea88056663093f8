//! Technology alias map
//!
//! Maps a declared (abstract) technology to the ordered list of file
//! technologies that satisfy it. Order in the list is a tie-break signal.
//!
//! Supports both single-value and list form in config:
//!   [tech_aliases]
//!   css = "styl"
//!   js = ["js", "vanilla.js"]

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TechAliases {
    map: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum AliasListDe {
    One(String),
    Many(Vec<String>),
}

impl<'de> Deserialize<'de> for TechAliases {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = BTreeMap::<String, AliasListDe>::deserialize(deserializer)?;
        let mut map = BTreeMap::new();
        for (tech, list) in raw {
            let aliases = match list {
                AliasListDe::One(alias) => vec![alias],
                AliasListDe::Many(aliases) => aliases,
            };
            if aliases.iter().all(|a| a.trim().is_empty()) {
                return Err(serde::de::Error::custom(format!(
                    "tech alias '{}' needs at least one file technology",
                    tech
                )));
            }
            map.insert(tech, aliases);
        }
        Ok(Self { map })
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid tech alias '{entry}': expected TECH=ALIAS[,ALIAS...]")]
pub struct TechAliasParseError {
    pub entry: String,
}

impl TechAliases {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, tech: impl Into<String>, aliases: Vec<String>) {
        self.map.insert(tech.into(), aliases);
    }

    pub fn with(mut self, tech: &str, aliases: &[&str]) -> Self {
        self.insert(tech, aliases.iter().map(|a| a.to_string()).collect());
        self
    }

    pub fn get(&self, tech: &str) -> Option<&[String]> {
        self.map.get(tech).map(Vec::as_slice)
    }

    /// Concrete file technologies for a declared tech, in tie-break order.
    ///
    /// A tech without an alias entry (or with an empty one) maps to itself.
    pub fn concrete<'a>(&'a self, tech: &'a str) -> Vec<&'a str> {
        match self.get(tech) {
            Some(aliases) if !aliases.is_empty() => aliases.iter().map(String::as_str).collect(),
            _ => vec![tech],
        }
    }

    /// Entries from `other` replace entries with the same tech.
    pub fn merge(&mut self, other: &TechAliases) {
        for (tech, aliases) in &other.map {
            self.map.insert(tech.clone(), aliases.clone());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Parse the CLI form `TECH=ALIAS[,ALIAS...]`.
    pub fn parse_entry(entry: &str) -> Result<(String, Vec<String>), TechAliasParseError> {
        let err = || TechAliasParseError {
            entry: entry.to_string(),
        };
        let (tech, list) = entry.split_once('=').ok_or_else(err)?;
        let tech = tech.trim();
        let aliases: Vec<String> = list
            .split(',')
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string)
            .collect();
        if tech.is_empty() || aliases.is_empty() {
            return Err(err());
        }
        Ok((tech.to_string(), aliases))
    }
}
