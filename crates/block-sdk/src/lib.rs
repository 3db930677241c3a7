//! # blockrender SDK
//!
//! Client-side previews for server-rendered blocks: the server owns the
//! rendering of a named UI block; this SDK fetches it, debounces re-fetches
//! when inputs change, guards against out-of-order responses, and selects
//! the output through substitutable placeholder slots.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use block_sdk::prelude::*;
//!
//! let client = RenderClient::new("https://example.com/wp-json")?;
//! let mut preview = BlockPreview::builder(client, "core/latest-posts")
//!     .with_attribute("postsToShow", 5)
//!     .build();
//!
//! preview.activate();
//! let mut snapshots = preview.subscribe();
//! while snapshots.changed().await.is_ok() {
//!     display(preview.html());
//! }
//! ```

pub mod prelude;

// Re-export the component crates
pub use block_core;
pub use block_data;
pub use block_lifecycle;
pub use block_view;
