//! Engine configuration.

/// Settings shared by every run an [`Engine`](crate::Engine) starts.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Name recorded on each run's tracing span.
    pub label: String,
    /// Log every node transition at `debug` instead of `trace` (default: false)
    pub log_transitions: bool,
}

impl EngineConfig {
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_log_transitions(mut self, enabled: bool) -> Self {
        self.log_transitions = enabled;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            label: "behavior".to_owned(),
            log_transitions: false,
        }
    }
}
