//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input (key names to game commands)
//! - Time (wall clock, seeds)
//! - Storage (LocalStorage on web, nothing natively)

pub mod input;
pub mod storage;
pub mod time;

pub use input::{Command, command_for_key};
