pub mod app_config;
pub mod minio_config;

pub use app_config::*;
pub use minio_config::*;
