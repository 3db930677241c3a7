//! Substitutable placeholder slots.

use block_core::RenderState;

/// Renders the empty placeholder, given the raw settled state.
pub type EmptySlot = Box<dyn Fn(&RenderState) -> String + Send + Sync>;

/// Renders the loading placeholder above the last-known rendered HTML.
pub type LoadingSlot = Box<dyn Fn(Option<&str>) -> String + Send + Sync>;

/// Renders the error placeholder, given the display-ready message.
pub type ErrorSlot = Box<dyn Fn(&str) -> String + Send + Sync>;

/// The three substitutable rendering slots.
///
/// Each slot can be replaced independently; defaults are provided for all
/// three.
pub struct PlaceholderSet {
    empty: EmptySlot,
    loading: LoadingSlot,
    error: ErrorSlot,
}

impl PlaceholderSet {
    /// Create a set with the default renderers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the empty slot.
    pub fn with_empty(
        mut self,
        slot: impl Fn(&RenderState) -> String + Send + Sync + 'static,
    ) -> Self {
        self.empty = Box::new(slot);
        self
    }

    /// Replace the loading slot.
    pub fn with_loading(
        mut self,
        slot: impl Fn(Option<&str>) -> String + Send + Sync + 'static,
    ) -> Self {
        self.loading = Box::new(slot);
        self
    }

    /// Replace the error slot.
    pub fn with_error(mut self, slot: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.error = Box::new(slot);
        self
    }

    /// Render the empty placeholder.
    pub fn empty(&self, state: &RenderState) -> String {
        (self.empty)(state)
    }

    /// Render the loading placeholder above the stale content, if any.
    pub fn loading(&self, nested: Option<&str>) -> String {
        (self.loading)(nested)
    }

    /// Render the error placeholder.
    pub fn error(&self, message: &str) -> String {
        (self.error)(message)
    }
}

impl Default for PlaceholderSet {
    fn default() -> Self {
        Self {
            empty: Box::new(default_empty),
            loading: Box::new(default_loading),
            error: Box::new(default_error),
        }
    }
}

/// Default empty placeholder.
pub fn default_empty(_state: &RenderState) -> String {
    r#"<div class="block-preview__empty">Block rendered as empty.</div>"#.to_string()
}

/// Default loading placeholder: a spinner pinned to a corner above the
/// stale content.
pub fn default_loading(nested: Option<&str>) -> String {
    format!(
        r#"<div class="block-preview__loading" style="position:relative">{}<span class="block-preview__spinner" style="position:absolute;top:4px;right:4px"></span></div>"#,
        nested.unwrap_or("")
    )
}

/// Default error placeholder.
pub fn default_error(message: &str) -> String {
    format!(
        r#"<div class="block-preview__error">Error loading block: {}</div>"#,
        html_escape(message)
    )
}

/// Simple HTML escape for error messages.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    // === Default Slot Tests ===

    #[test]
    fn test_default_empty_message() {
        let html = default_empty(&RenderState::Empty);
        assert!(html.contains("Block rendered as empty."));
    }

    #[test]
    fn test_default_error_interpolates_message() {
        let html = default_error("Invalid block");
        assert!(html.contains("Error loading block: Invalid block"));
    }

    #[test]
    fn test_default_error_escapes_markup() {
        let html = default_error("<script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_default_loading_nests_stale_content() {
        let html = default_loading(Some("<ul>old</ul>"));
        assert!(html.contains("<ul>old</ul>"));
        assert!(html.contains("block-preview__spinner"));
    }

    #[test]
    fn test_default_loading_without_content() {
        let html = default_loading(None);
        assert!(html.contains("block-preview__spinner"));
    }

    // === Override Tests ===

    #[test]
    fn test_slots_are_independently_replaceable() {
        let set = PlaceholderSet::new()
            .with_error(|message| format!("custom: {}", message));

        assert_eq!(set.error("boom"), "custom: boom");
        // The other slots keep their defaults.
        assert!(set.empty(&RenderState::Empty).contains("Block rendered as empty."));
        assert!(set.loading(None).contains("block-preview__spinner"));
    }
}
