pub mod app;
pub mod config;
pub mod csv_loader;
pub mod logging;
pub mod login;
pub mod render;
pub mod shell;
pub mod state;
pub mod utils;
