//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod env_config_store;
mod fs_object_store;
mod http_alert_source;
mod in_memory_config_store;
mod in_memory_object_store;

pub use env_config_store::EnvConfigStore;
pub use fs_object_store::FsObjectStore;
pub use http_alert_source::{HttpAlertSource, HttpAlertSourceConfig};
pub use in_memory_config_store::InMemoryConfigStore;
pub use in_memory_object_store::{InMemoryObjectStore, StoredObject};
