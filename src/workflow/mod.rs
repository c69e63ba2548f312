pub mod branch;
pub mod update;
