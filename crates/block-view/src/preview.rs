//! Block preview assembly.

use block_core::{RenderSnapshot, RenderState};
use block_data::{Method, RenderClient, RenderRequest};
use block_lifecycle::{ControllerConfig, RenderController};
use serde_json::{Map, Value};
use tokio::sync::watch;

use crate::{select_render, PlaceholderSet};

/// A server-rendered block preview: fetch lifecycle plus output selection.
///
/// # Example
///
/// ```rust,ignore
/// let mut preview = BlockPreview::builder(client, "core/latest-posts")
///     .with_attribute("postsToShow", 5)
///     .with_class_name("sidebar-preview")
///     .build();
///
/// preview.activate();
/// // ... later, on input change:
/// preview.set_attributes(Some(new_attributes));
/// let html = preview.html();
/// ```
pub struct BlockPreview {
    controller: RenderController,
    placeholders: PlaceholderSet,
    class_name: Option<String>,
}

impl BlockPreview {
    /// Create a preview with defaults for a GET-rendered block.
    pub fn new(client: RenderClient, block: impl Into<String>) -> Self {
        Self::builder(client, block).build()
    }

    /// Start building a preview.
    pub fn builder(client: RenderClient, block: impl Into<String>) -> BlockPreviewBuilder {
        BlockPreviewBuilder::new(client, block)
    }

    /// Activate the preview; the first fetch is issued immediately.
    pub fn activate(&mut self) {
        self.controller.activate();
    }

    /// Replace the request inputs. Deep-equal inputs are a no-op; a change
    /// schedules a debounced fetch. Returns whether a fetch was scheduled.
    pub fn update(&mut self, request: RenderRequest) -> bool {
        self.controller.update(request)
    }

    /// Replace just the attribute map, keeping the other inputs.
    pub fn set_attributes(&mut self, attributes: Option<Map<String, Value>>) -> bool {
        let mut request = self.controller.request().clone();
        request.attributes = attributes;
        self.update(request)
    }

    /// Get the current request inputs.
    pub fn request(&self) -> &RenderRequest {
        self.controller.request()
    }

    /// Get the current snapshot.
    pub fn snapshot(&self) -> RenderSnapshot {
        self.controller.snapshot()
    }

    /// Subscribe to snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<RenderSnapshot> {
        self.controller.subscribe()
    }

    /// Get the last settled render state.
    pub fn state(&self) -> RenderState {
        self.controller.snapshot().state
    }

    /// Render the current output through the placeholder slots, wrapped in
    /// the caller's styling hook when one was given.
    pub fn html(&self) -> String {
        let inner = select_render(&self.controller.snapshot(), &self.placeholders);
        match &self.class_name {
            Some(class) => format!(r#"<div class="{}">{}</div>"#, class, inner),
            None => inner,
        }
    }

    /// Tear the preview down; late fetch resolutions are discarded.
    pub fn deactivate(&mut self) {
        self.controller.deactivate();
    }
}

/// Builder for a [`BlockPreview`].
pub struct BlockPreviewBuilder {
    client: RenderClient,
    request: RenderRequest,
    config: ControllerConfig,
    placeholders: PlaceholderSet,
    class_name: Option<String>,
}

impl BlockPreviewBuilder {
    /// Start a builder for a GET-rendered block.
    pub fn new(client: RenderClient, block: impl Into<String>) -> Self {
        Self {
            client,
            request: RenderRequest::get(block),
            config: ControllerConfig::default(),
            placeholders: PlaceholderSet::new(),
            class_name: None,
        }
    }

    /// Set the full attribute map.
    pub fn with_attributes(mut self, attributes: Map<String, Value>) -> Self {
        self.request = self.request.with_attributes(attributes);
        self
    }

    /// Set a single attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.request = self.request.with_attribute(key, value);
        self
    }

    /// Set the HTTP method used to reach the endpoint.
    pub fn with_method(mut self, method: Method) -> Self {
        self.request = self.request.with_method(method);
        self
    }

    /// Add an extra query argument.
    pub fn with_query_arg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request = self.request.with_query_arg(key, value);
        self
    }

    /// Set the controller config.
    pub fn with_config(mut self, config: ControllerConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the styling hook class applied to the wrapper element.
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Replace the empty placeholder slot.
    pub fn with_empty_placeholder(
        mut self,
        slot: impl Fn(&RenderState) -> String + Send + Sync + 'static,
    ) -> Self {
        self.placeholders = self.placeholders.with_empty(slot);
        self
    }

    /// Replace the loading placeholder slot.
    pub fn with_loading_placeholder(
        mut self,
        slot: impl Fn(Option<&str>) -> String + Send + Sync + 'static,
    ) -> Self {
        self.placeholders = self.placeholders.with_loading(slot);
        self
    }

    /// Replace the error placeholder slot.
    pub fn with_error_placeholder(
        mut self,
        slot: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        self.placeholders = self.placeholders.with_error(slot);
        self
    }

    /// Build the preview.
    pub fn build(self) -> BlockPreview {
        BlockPreview {
            controller: RenderController::with_config(self.client, self.request, self.config),
            placeholders: self.placeholders,
            class_name: self.class_name,
        }
    }
}
