//! Fetch lifecycle for server-rendered block previews.
//!
//! This crate provides:
//! - `RenderController` - Debounced fetch-and-publish state machine
//! - `ControllerConfig` - Debounce tuning
//!
//! The controller guarantees that only the most recently *issued* fetch may
//! mutate state: a slow superseded request resolving late is discarded, never
//! applied over a newer result.

mod config;
mod controller;

pub use config::*;
pub use controller::*;
