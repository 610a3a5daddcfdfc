pub mod account;
pub mod config;
pub mod metadata;
pub mod service;
pub mod utils;
