use serde::{Deserialize, Serialize};
use std::fmt;

/// Phabricator repository callsign
///
/// Derived from a repository name by uppercasing it and dropping every `-`,
/// so `first-repo` becomes `FIRSTREPO`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Callsign(String);

impl Callsign {
    /// Derive the callsign for a repository name
    pub fn from_repository_name(name: &str) -> Self {
        Self(name.to_uppercase().replace('-', ""))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Callsign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
