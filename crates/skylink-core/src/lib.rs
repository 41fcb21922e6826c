//! Core types and definitions for the SKYLINK airfield simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometry, signal enums, configuration, commands, events, report
//! records and constants. It has no dependency on any scene backend.

pub mod catalog;
pub mod commands;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;

pub use error::{CoreError, CoreResult};
