pub mod authorize_ssh;
pub mod init_repositories;
pub mod start_servers;
