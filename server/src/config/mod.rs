//! Configuration: defaults and environment loading.

pub mod app_config;

pub use app_config::AppConfig;
