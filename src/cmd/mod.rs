pub mod branch;
pub mod config;
pub mod setup;
pub mod update;
pub mod version;
