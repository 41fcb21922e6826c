//! SKYLINK headless runner.
//!
//! Loads a scene and configuration, drives the simulation engine on its
//! own thread at the host tick rate and summarizes each frame report
//! through `tracing`.

pub mod cli;
pub mod config;
pub mod error;
pub mod report;
pub mod sim_loop;
pub mod state;

pub use skylink_core as core;
pub use error::AppError;
