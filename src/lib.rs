#![doc = include_str!("../README.md")]

pub mod actions;
pub mod client;
pub mod config;
pub mod display;
pub mod display_manager;
pub mod drag;
pub mod errors;
pub mod event;
pub mod focus;
pub mod geometry;
pub mod input;
pub mod layout;
pub mod monitor;
pub mod prelude;
pub mod wm;
