use crate::storage::Backend;
use crate::storage::error::BackendError;
use tracing::warn;

/// A single text buffer persisted under one key.
pub struct TextPad<B> {
    backend: B,
    key: &'static str,
}

impl<B: Backend> TextPad<B> {
    pub fn new(backend: B, key: &'static str) -> Self {
        Self { backend, key }
    }

    /// The saved text; empty when nothing is stored or storage can't be read.
    pub fn load(&self) -> String {
        match self.backend.get(self.key) {
            Ok(text) => text.unwrap_or_default(),
            Err(e) => {
                warn!(key = self.key, error = %e, "could not read saved text");
                String::new()
            }
        }
    }

    pub fn save(&self, text: &str) -> Result<(), BackendError> {
        self.backend.set(self.key, text)
    }

    pub fn clear(&self) -> Result<(), BackendError> {
        self.backend.remove(self.key)
    }
}
