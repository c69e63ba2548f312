pub mod branch;
pub mod status;
pub mod ticket;
pub mod update;
pub mod version;
