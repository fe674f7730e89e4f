//! CLI command handlers

pub mod commands;

pub use commands::{inspect, layout, render, template};
