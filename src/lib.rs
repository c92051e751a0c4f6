// Public modules
pub mod archive;
pub mod artifact;
pub mod cli;
pub mod config;
pub mod download;
pub mod install;
pub mod models;
pub mod output;
pub mod platform;
pub mod process;
pub mod runner;
pub mod workdir;

// Re-export commonly used types
pub use models::*;
