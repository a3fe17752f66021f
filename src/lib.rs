pub mod api;
pub mod config;
pub mod database;
pub mod models;
pub mod seeds;
pub mod services;
pub mod utils;
