//! Render state for a block preview.

use serde::Serialize;

/// Settled outcome of the latest authoritative fetch.
///
/// Exactly one variant is active at a time. Loading is deliberately not a
/// variant: it is tracked as a flag on [`RenderSnapshot`] so the previous
/// settled render stays available underneath a loading overlay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "lowercase")]
pub enum RenderState {
    /// No fetch has settled yet.
    Idle,
    /// The server returned a non-empty rendered HTML string.
    Success(String),
    /// The server returned an exactly empty rendered string.
    Empty,
    /// The fetch failed with a display-ready message.
    Error(String),
}

impl RenderState {
    /// Build the settled state for a rendered HTML string.
    ///
    /// An exactly empty string settles as `Empty`, not `Success("")`.
    pub fn from_rendered(html: impl Into<String>) -> Self {
        let html = html.into();
        if html.is_empty() {
            Self::Empty
        } else {
            Self::Success(html)
        }
    }

    /// Check whether the state is `Empty`.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Get the rendered HTML, if the state is `Success`.
    pub fn html(&self) -> Option<&str> {
        match self {
            Self::Success(html) => Some(html),
            _ => None,
        }
    }

    /// Get the error message, if the state is `Error`.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Current state of a block preview: the settled outcome plus whether a
/// fetch is in flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderSnapshot {
    /// Settled outcome of the latest authoritative fetch.
    pub state: RenderState,
    /// Whether a fetch is currently in flight.
    pub loading: bool,
}

impl RenderSnapshot {
    /// Snapshot at activation: nothing settled, fetch about to be issued.
    pub fn initial() -> Self {
        Self {
            state: RenderState::Idle,
            loading: true,
        }
    }

    /// Snapshot for a settled state with no fetch in flight.
    pub fn settled(state: RenderState) -> Self {
        Self {
            state,
            loading: false,
        }
    }
}

impl Default for RenderSnapshot {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // === RenderState Tests ===

    #[test]
    fn test_from_rendered_non_empty() {
        let state = RenderState::from_rendered("<ul>posts</ul>");
        assert_eq!(state, RenderState::Success("<ul>posts</ul>".to_string()));
        assert_eq!(state.html(), Some("<ul>posts</ul>"));
    }

    #[test]
    fn test_from_rendered_empty_string() {
        let state = RenderState::from_rendered("");
        assert_eq!(state, RenderState::Empty);
        assert!(state.is_empty());
        assert_eq!(state.html(), None);
    }

    #[test]
    fn test_error_message() {
        let state = RenderState::Error("Invalid block".to_string());
        assert_eq!(state.error_message(), Some("Invalid block"));
        assert_eq!(RenderState::Idle.error_message(), None);
    }

    #[test]
    fn test_html_only_on_success() {
        assert_eq!(RenderState::Idle.html(), None);
        assert_eq!(RenderState::Empty.html(), None);
        assert_eq!(RenderState::Error("x".to_string()).html(), None);
    }

    // === RenderSnapshot Tests ===

    #[test]
    fn test_initial_snapshot_is_loading_idle() {
        let snapshot = RenderSnapshot::initial();
        assert_eq!(snapshot.state, RenderState::Idle);
        assert!(snapshot.loading);
    }

    #[test]
    fn test_settled_snapshot_clears_loading() {
        let snapshot = RenderSnapshot::settled(RenderState::Empty);
        assert_eq!(snapshot.state, RenderState::Empty);
        assert!(!snapshot.loading);
    }

    #[test]
    fn test_snapshot_serializes_for_json_output() {
        let snapshot = RenderSnapshot::settled(RenderState::Success("<p>hi</p>".to_string()));
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["state"]["state"], "success");
        assert_eq!(json["state"]["value"], "<p>hi</p>");
        assert_eq!(json["loading"], false);
    }
}
