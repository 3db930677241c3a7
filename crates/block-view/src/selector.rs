//! State-to-output selection.

use block_core::RenderSnapshot;

use crate::PlaceholderSet;

/// Map the current snapshot to one of four outputs.
///
/// Precedence, first match wins:
/// 1. settled `Empty` - empty placeholder, given the raw state
/// 2. loading flag - loading placeholder above the last-known success HTML
/// 3. settled `Error` - error placeholder, given the message
/// 4. otherwise - the raw rendered HTML string
pub fn select_render(snapshot: &RenderSnapshot, placeholders: &PlaceholderSet) -> String {
    if snapshot.state.is_empty() {
        return placeholders.empty(&snapshot.state);
    }
    if snapshot.loading {
        return placeholders.loading(snapshot.state.html());
    }
    if let Some(message) = snapshot.state.error_message() {
        return placeholders.error(message);
    }
    snapshot.state.html().unwrap_or_default().to_string()
}
