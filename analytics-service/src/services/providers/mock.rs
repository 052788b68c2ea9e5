//! Mock provider implementation for testing.

use super::{ProviderError, TextProvider};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Mock text provider returning a canned response and recording the
/// segments it was asked to generate from.
pub struct MockTextProvider {
    enabled: bool,
    response: String,
    calls: Arc<Mutex<Vec<Vec<String>>>>,
}

impl MockTextProvider {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            enabled: true,
            response: response.into(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A provider that fails every call, for exercising the fatal path.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            response: String::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// The part lists passed to `generate`, in call order.
    pub fn recorded_calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().expect("calls lock poisoned").clone()
    }

    /// Handle for inspecting calls after the provider moved into app state.
    pub fn call_log(&self) -> Arc<Mutex<Vec<Vec<String>>>> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(&self, parts: &[String]) -> Result<String, ProviderError> {
        if !self.enabled {
            return Err(ProviderError::NotConfigured(
                "Mock text provider not enabled".to_string(),
            ));
        }

        self.calls
            .lock()
            .expect("calls lock poisoned")
            .push(parts.to_vec());

        Ok(self.response.clone())
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        if self.enabled {
            Ok(())
        } else {
            Err(ProviderError::NotConfigured(
                "Mock text provider not enabled".to_string(),
            ))
        }
    }
}
