pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod router;
pub mod session;
pub mod storage;
pub mod types;
pub mod views;
