//! Scripted oracle for tests: replays queued responses and counts calls.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{LlmError, Oracle};

#[derive(Default)]
pub struct MockOracle {
    responses: Mutex<VecDeque<Result<String, String>>>,
    prompts: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl MockOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful text response.
    pub fn respond(self, text: impl Into<String>) -> Self {
        self.push(Ok(text.into()));
        self
    }

    /// Queues a transport-level failure.
    pub fn fail(self, message: impl Into<String>) -> Self {
        self.push(Err(message.into()));
        self
    }

    pub fn push(&self, response: Result<String, String>) {
        self.responses
            .lock()
            .expect("mock oracle lock poisoned")
            .push_back(response);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts
            .lock()
            .expect("mock oracle lock poisoned")
            .last()
            .cloned()
    }
}

#[async_trait]
impl Oracle for MockOracle {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts
            .lock()
            .expect("mock oracle lock poisoned")
            .push(prompt.to_string());
        let next = self
            .responses
            .lock()
            .expect("mock oracle lock poisoned")
            .pop_front();
        match next {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(LlmError::Api {
                status: 503,
                message,
            }),
            None => Err(LlmError::EmptyContent),
        }
    }
}
