pub mod clusters;
pub mod config;
pub mod projects;
