pub mod config;
pub mod persist;
pub mod sim;
