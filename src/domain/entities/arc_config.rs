use serde::{Deserialize, Serialize};

use crate::domain::entities::repository::RepositoryDescriptor;
use crate::domain::value_objects::callsign::Callsign;

/// File name of the per-repository Arcanist sidecar
pub const ARC_CONFIG_FILE_NAME: &str = ".arcconfig";

/// Per-repository `.arcconfig` contents consumed by Arcanist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArcConfig {
    #[serde(rename = "phabricator.uri")]
    pub phabricator_uri: String,

    #[serde(rename = "history.immutable")]
    pub history_immutable: bool,

    #[serde(rename = "repository.callsign")]
    pub repository_callsign: Callsign,
}

impl ArcConfig {
    /// Sidecar for `repository`; history is always immutable since the
    /// initial revision is published
    pub fn for_repository(repository: &RepositoryDescriptor, phabricator_uri: &str) -> Self {
        Self {
            phabricator_uri: phabricator_uri.to_string(),
            history_immutable: true,
            repository_callsign: repository.callsign(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
