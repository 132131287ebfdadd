use crate::renderer::RenderMode;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// User's answer to the install prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallOutcome {
    Accepted,
    Dismissed,
}

/// Deferred "add to home screen" prompt.
///
/// The host hands over the platform's prompt when it fires; the page keeps it
/// until the visitor accepts. Never captured while editing.
#[derive(Debug, Default)]
pub struct InstallPrompt<P> {
    deferred: Option<P>,
}

impl<P> InstallPrompt<P> {
    pub fn new() -> Self {
        Self { deferred: None }
    }

    /// Keep the platform prompt for later; ignored in preview
    pub fn capture(&mut self, prompt: P, mode: &RenderMode) -> bool {
        if mode.is_preview() {
            return false;
        }
        self.deferred = Some(prompt);
        true
    }

    /// Whether an install button should be shown
    pub fn is_available(&self) -> bool {
        self.deferred.is_some()
    }

    /// The prompt to show, if any
    pub fn prompt(&self) -> Option<&P> {
        self.deferred.as_ref()
    }

    pub fn resolve(&mut self, outcome: InstallOutcome) {
        debug!(?outcome, "install prompt resolved");
        if outcome == InstallOutcome::Accepted {
            self.deferred = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_captured_in_preview() {
        let mut prompt = InstallPrompt::new();
        assert!(!prompt.capture("event", &RenderMode::preview()));
        assert!(!prompt.is_available());
    }

    #[test]
    fn test_accept_clears_dismiss_keeps() {
        let mut prompt = InstallPrompt::new();
        assert!(prompt.capture("event", &RenderMode::Publish));

        prompt.resolve(InstallOutcome::Dismissed);
        assert_eq!(prompt.prompt(), Some(&"event"));

        prompt.resolve(InstallOutcome::Accepted);
        assert!(!prompt.is_available());
    }
}
