//! Controller tuning.

use std::time::Duration;

/// Debounce window applied to input changes.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Tuning for the fetch lifecycle controller.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Quiet period required after an input change before a fetch is issued.
    /// Activation bypasses it.
    pub debounce: Duration,
}

impl ControllerConfig {
    /// Create a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the debounce window.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_debounce() {
        assert_eq!(ControllerConfig::new().debounce, Duration::from_millis(500));
    }

    #[test]
    fn test_with_debounce() {
        let config = ControllerConfig::new().with_debounce(Duration::from_millis(50));
        assert_eq!(config.debounce, Duration::from_millis(50));
    }
}
