/// SCM (Source Control Management) operations infrastructure
///
/// Provisioning drives Mercurial through its command line; the trait keeps
/// use cases independent of the real binary.

pub mod hg_scm;
pub mod scm_interface;

pub use hg_scm::HgScm;
pub use scm_interface::{CommandOutcome, HgOperations, ScmError};
