//! Capture triggers
//!
//! Whatever makes the popup appear (a global hotkey listener, a command-line
//! invocation) is a `CaptureTrigger` handed to the application at startup.
//! The application keeps at most one registered for its lifetime.

use crate::error::{CaptureError, CaptureResult};

/// Source of show/hide capture actions
pub trait CaptureTrigger {
    /// Human-readable description for logs
    fn describe(&self) -> String;

    /// Start listening on `binding`, e.g. `ctrl+alt+n`
    fn register(&mut self, binding: &str) -> CaptureResult<()>;

    /// Stop listening. Must be safe to call when not registered.
    fn unregister(&mut self);
}

/// Trigger for one-shot command-line captures
///
/// Each invocation of the binary is itself the trigger, so registering only
/// records the configured binding.
#[derive(Debug, Default)]
pub struct CommandLineTrigger {
    binding: Option<String>,
}

impl CommandLineTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn binding(&self) -> Option<&str> {
        self.binding.as_deref()
    }
}

impl CaptureTrigger for CommandLineTrigger {
    fn describe(&self) -> String {
        match &self.binding {
            Some(binding) => format!("command line (popup hotkey {})", binding),
            None => "command line".to_string(),
        }
    }

    fn register(&mut self, binding: &str) -> CaptureResult<()> {
        let binding = binding.trim();
        if binding.is_empty() {
            return Err(CaptureError::Validation("Hotkey cannot be empty".into()));
        }
        self.binding = Some(binding.to_string());
        Ok(())
    }

    fn unregister(&mut self) {
        self.binding = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line_trigger() {
        let mut trigger = CommandLineTrigger::new();
        assert_eq!(trigger.describe(), "command line");

        trigger.register(" ctrl+alt+n ").unwrap();
        assert_eq!(trigger.binding(), Some("ctrl+alt+n"));
        assert_eq!(trigger.describe(), "command line (popup hotkey ctrl+alt+n)");

        trigger.unregister();
        trigger.unregister();
        assert_eq!(trigger.binding(), None);
    }

    #[test]
    fn test_rejects_empty_binding() {
        let mut trigger = CommandLineTrigger::new();
        assert!(trigger.register("   ").is_err());
    }
}
