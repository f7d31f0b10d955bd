/// Infrastructure layer modules
///
/// This layer provides concrete implementations for external system interactions:
/// - SCM operations (Mercurial)
/// - File system operations (hgweb config, authorized keys)
/// - Process launching (sshd, hg serve)
pub mod filesystem;
pub mod process;
pub mod scm;

// Re-export commonly used types
pub use filesystem::{authorized_keys_store::AuthorizedKeysStore, web_config_store::WebConfigStore};
pub use process::{LaunchSpec, ProcessLauncher};
pub use scm::{CommandOutcome, HgOperations, HgScm, ScmError};
