pub mod commands;
pub mod core;
pub mod formatters;
pub mod help;
pub mod output;
pub mod registry;
pub mod render;
pub mod shell;
pub mod table;

pub use shell::run_cli;
