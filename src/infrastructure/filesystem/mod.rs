pub mod authorized_keys_store;
pub mod web_config_store;

pub use authorized_keys_store::AuthorizedKeysStore;
pub use web_config_store::WebConfigStore;
