pub mod authorize_ssh;
pub mod init;
pub mod start;

pub use authorize_ssh::*;
pub use init::*;
pub use start::*;
