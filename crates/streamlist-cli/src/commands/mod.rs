pub mod clear;
pub mod config;
pub mod list;
pub mod mutate;
pub mod prompts;
pub mod search;
pub mod search_ui;
pub mod shell;
