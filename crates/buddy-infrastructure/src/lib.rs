pub mod config_storage;
pub mod http_transport;
pub mod paths;
pub mod upload;

pub use crate::config_storage::ConfigStorage;
pub use crate::http_transport::HttpTransport;
pub use crate::paths::BuddyPaths;
pub use crate::upload::upload_from_path;
