//! Core abstractions for server-rendered block previews.
//!
//! This crate provides the fundamental types:
//! - `RenderState` - Settled outcome of the latest authoritative fetch
//! - `RenderSnapshot` - Settled state plus the independent loading flag
//! - `LifecyclePhase` - Preview lifecycle tracking
//! - `TimingContext` - Mark-based fetch timing

mod lifecycle;
mod state;

pub use lifecycle::*;
pub use state::*;
