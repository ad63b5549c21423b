//! IDE profiles and their placeholder variable tables.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::error::AppError;

/// Namespace directory the toolkit installs its commands and scripts under.
pub const TOOLKIT_NAMESPACE: &str = "NioPD";

/// A supported IDE integration target.
///
/// Each profile owns a root directory of the form `.<profile>`; everything
/// written for a profile lives under that root, which is what keeps
/// side-by-side installations isolated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Claude Code (`.claude/`).
    Claude,
    /// iFlow CLI (`.iflow/`).
    Iflow,
}

impl Profile {
    /// All supported profiles in order.
    pub const ALL: [Profile; 2] = [Profile::Claude, Profile::Iflow];

    /// Short identifier used on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Profile::Claude => "claude",
            Profile::Iflow => "iflow",
        }
    }

    /// Root directory name for this profile.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Profile::Claude => ".claude",
            Profile::Iflow => ".iflow",
        }
    }

    /// Human-readable display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Profile::Claude => "Claude Code",
            Profile::Iflow => "iFlow CLI",
        }
    }

    /// Parse a profile from its short identifier.
    pub fn from_name(name: &str) -> Result<Profile, AppError> {
        match name.to_lowercase().as_str() {
            "claude" => Ok(Profile::Claude),
            "iflow" => Ok(Profile::Iflow),
            _ => Err(AppError::UnknownProfile(name.to_string())),
        }
    }

    /// Resolve the placeholder variable table for this profile.
    ///
    /// The table is the closed set of names the template engine recognizes;
    /// every value is a relative path rooted at this profile's directory.
    pub fn variables(&self) -> VariableTable {
        let root = self.dir_name();
        VariableTable::new([
            ("SCRIPTS_DIR", format!("{root}/scripts/{TOOLKIT_NAMESPACE}")),
            ("IDE_DIR", root.to_string()),
        ])
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Immutable placeholder-name to resolved-path mapping for one profile.
///
/// Built once per profile per run and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct VariableTable {
    entries: BTreeMap<&'static str, String>,
}

impl VariableTable {
    fn new<I: IntoIterator<Item = (&'static str, String)>>(entries: I) -> Self {
        Self { entries: entries.into_iter().collect() }
    }

    /// Look up a resolved value by placeholder name. Case-sensitive.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Iterate entries in deterministic (lexicographic) order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.entries.iter().map(|(name, value)| (*name, value.as_str()))
    }
}
