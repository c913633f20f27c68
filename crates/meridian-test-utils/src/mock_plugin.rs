// SPDX-FileCopyrightText: 2026 Meridian Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock modality plugin with scripted initialization.
//!
//! `MockModality` behaves like a [`StaticModality`] except that its
//! `initialize()` can be delayed or made to fail, and the number of calls is
//! recorded for assertions.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use meridian_core::{MeridianError, ModalityDefinition, ModalityPlugin};

/// A plugin whose initialization outcome is chosen by the test.
#[derive(Debug)]
pub struct MockModality {
    definition: ModalityDefinition,
    delay: Option<Duration>,
    failure: Option<String>,
    init_calls: Arc<AtomicUsize>,
}

impl MockModality {
    /// A mock that initializes successfully after normal validation.
    pub fn new(definition: ModalityDefinition) -> Self {
        Self {
            definition,
            delay: None,
            failure: None,
            init_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Sleep for `delay` before validating.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Always fail initialization with `message`.
    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    /// Shared counter of `initialize()` calls.
    pub fn init_calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.init_calls)
    }
}

#[async_trait]
impl ModalityPlugin for MockModality {
    fn definition(&self) -> &ModalityDefinition {
        &self.definition
    }

    async fn initialize(&self) -> Result<(), MeridianError> {
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.failure {
            Some(message) => Err(MeridianError::validation(self.id(), message.clone())),
            None => meridian_core::defaults::validate_definition(&self.definition),
        }
    }
}
