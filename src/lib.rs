pub mod app;
pub mod code_utils;
pub mod config;
pub mod data;
pub mod error;
pub mod gateway;
pub mod model;
pub mod progress;
pub mod runs;
pub mod store;
pub mod ui;
pub mod verify;
pub mod view_models;
#[cfg(target_arch = "wasm32")]
mod web;

pub use app::TutorApp;
pub use config::TutorConfig;
