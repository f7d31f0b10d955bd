//! # hgdev - Mercurial development environment bootstrap
//!
//! `hgdev` prepares a throwaway Mercurial hosting environment for local
//! development: it creates a fixed set of repositories, writes the hgweb
//! config that publishes them, installs an SSH public key and then runs
//! `sshd` and `hg serve`.
//!
//! ## Commands
//!
//! ```bash
//! # Create /repos/{test-repo,first-repo,second-repo,third-repo} and /repos/hgweb.config
//! ARCCONFIG=y hgdev init
//!
//! # Make $SSH_PUBLIC_KEY the only entry in ~/.ssh/authorized_keys
//! hgdev authorize-ssh
//!
//! # Do both, start sshd on 8022 and block on hg serve on 8000
//! hgdev start
//! ```
//!
//! ## Architecture
//!
//! - [`domain`]: repository descriptors, callsigns and the `.arcconfig` sidecar
//! - [`application`]: one use case per command
//! - [`infrastructure`]: the hg driver, process launching and file stores
//! - [`presentation`]: CLI interface
//! - [`common`]: error handling
//!
//! ## Error Handling
//!
//! Provisioning is best effort. Non-zero hg exit codes are logged and
//! skipped; filesystem failures and missing binaries surface as
//! [`common::error::HgDevError`].
//!
//! ## Using the Library
//!
//! ```rust,no_run
//! use hgdev::application::use_cases::init_repositories::{
//!     InitRepositoriesConfig, InitRepositoriesUseCase,
//! };
//!
//! # async fn example() -> hgdev::Result<()> {
//! let config = InitRepositoriesConfig::new("/tmp/repos").with_arc_config(true);
//! let result = InitRepositoriesUseCase::new(config).execute().await?;
//!
//! for repo in &result.repositories {
//!     println!("{} -> {}", repo.name, repo.path.display());
//! }
//! # Ok(())
//! # }
//! ```

#![deny(rustdoc::broken_intra_doc_links)]

pub mod application;
pub mod common;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

// Re-export commonly used types for convenience
pub use crate::common::error::HgDevError;
pub use crate::common::result::HgDevResult as Result;
