pub mod commands;
pub mod config;
pub mod database;
pub mod errors;
pub mod generator;
pub mod models;
pub mod services;
pub mod sources;
pub mod utils;
