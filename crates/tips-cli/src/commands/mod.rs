pub mod batch;
pub mod common;
pub mod config;
pub mod list;
pub mod show;
