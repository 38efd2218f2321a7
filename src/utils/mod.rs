pub mod config;
pub mod constants;
pub mod env;
pub mod progress_config;
pub mod text;
