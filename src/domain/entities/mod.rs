pub mod arc_config;
pub mod repository;
