//! Convenient imports for the common case.

pub use block_core::{LifecycleObserver, LifecyclePhase, RenderSnapshot, RenderState};
pub use block_data::{FetchError, Method, RenderClient, RenderRequest};
pub use block_lifecycle::{ControllerConfig, RenderController};
pub use block_view::{select_render, BlockPreview, PlaceholderSet};
