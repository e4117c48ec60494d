//! Configuration to acknowledge writer preferences as well as set defaults.
//!
//! We look for a texwords.toml (or the file passed with `--config`), and if present we load
//! settings from there. This provides the report depth and extensions to the reduction policy
//! for project-specific macros and environments.

use crate::policy::{CommandAction, Policy};
use facet::Facet;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Facet, Clone, Debug, PartialEq)]
/// User preferences loaded from texwords.toml or falling back to defaults.
pub struct Config {
    #[facet(default = 2)]
    /// Report depth: 0 total only, 1 sections, 2 subsections.
    pub depth: usize,
    #[facet(default = false)]
    /// List zero-count preamble and subsections in the report.
    pub show_empty: bool,
    #[facet(default = Vec::new())]
    /// Extra environments whose bodies are not prose.
    pub skip_environments: Vec<String>,
    #[facet(default = Vec::new())]
    /// Extra commands whose arguments are dropped.
    pub discard_commands: Vec<String>,
    #[facet(default = Vec::new())]
    /// Commands whose braced arguments are always kept as prose.
    pub preserve_commands: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        // Every field carries a facet default, so an empty document always parses.
        facet_toml::from_str::<Self>("").expect("empty config falls back to field defaults")
    }
}

impl Config {
    /// Name of the configuration file looked up in the working directory.
    pub const FILE_NAME: &'static str = "texwords.toml";

    #[must_use]
    /// Load configuration from `path`, or from texwords.toml when no path is given.
    ///
    /// Missing files give the defaults; a file that fails to parse is reported and ignored.
    ///
    /// # Panics
    ///
    /// Panics if the default configuration cannot be parsed.
    pub fn load(path: Option<&Path>) -> Self {
        let path = path.unwrap_or_else(|| Path::new(Self::FILE_NAME));
        let Ok(contents) = fs::read_to_string(path) else {
            debug!(path = %path.display(), "no config file, using defaults");
            return Self::default();
        };
        Self::parse(&contents).unwrap_or_else(|| {
            warn!(path = %path.display(), "could not parse config, using defaults");
            Self::default()
        })
    }

    #[must_use]
    /// Parse a TOML document, returning `None` if it does not describe a config.
    pub fn parse(contents: &str) -> Option<Self> {
        facet_toml::from_str::<Self>(contents).ok()
    }

    #[must_use]
    /// Built-in reduction policy extended with the configured names.
    pub fn policy(&self) -> Policy {
        let mut policy = Policy::default();
        for name in &self.skip_environments {
            policy = policy.skip_environment(name);
        }
        for name in &self.discard_commands {
            policy = policy.with_command(name, CommandAction::Discard);
        }
        for name in &self.preserve_commands {
            policy = policy.with_command(name, CommandAction::Preserve);
        }
        policy
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
