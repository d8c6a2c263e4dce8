pub mod types;
pub mod config;
pub mod data;
pub mod filter;
pub mod views;
pub mod controller;
pub mod server;
