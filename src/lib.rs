pub mod api;
pub mod app;
pub mod commands;
pub mod config;
pub mod controllers;
pub mod models;
pub mod ui;
pub mod utils;

#[cfg(test)]
mod test_support;
