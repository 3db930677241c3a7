//! Output selection for server-rendered block previews.
//!
//! This crate provides:
//! - `PlaceholderSet` - Three substitutable rendering slots with defaults
//! - `select_render` - State-to-output precedence mapping
//! - `BlockPreview` - Controller plus placeholders, assembled per block

mod placeholder;
mod preview;
mod selector;

pub use placeholder::*;
pub use preview::*;
pub use selector::*;
