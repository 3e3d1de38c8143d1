//! # Mock Invoker & Testing Guide
//!
//! `MockInvoker` implements [`Invoker`] without any server or actor. Tests queue the responses
//! they want, run client code, then inspect exactly which calls were issued.
//!
//! ## When to use the Mock vs the In-Process Catalog
//!
//! | Feature | MockInvoker | CatalogActor |
//! |---------|-------------|--------------|
//! | **Speed** | Instant | Fast (one tokio task) |
//! | **State** | None (scripted replies) | Real store, GUIDs, zones |
//! | **Inspects requests** | Yes (`calls`, `paths`) | No |
//! | **Error Injection** | Easy (`return_err`) | Only what the catalog would raise |
//! | **Use Case** | URLs, validation, envelope unwrapping | End-to-end behavior |
//!
//! ```rust
//! use entity_client::mock::MockInvoker;
//! use serde_json::json;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let mock = MockInvoker::new();
//! mock.expect("createTopic").return_ok(json!({ "guid": "t-1" }));
//!
//! // Pass `Arc::new(mock.clone())` to a client, exercise it, then:
//! // assert_eq!(mock.paths()[0], "/servers/...");
//! // mock.verify();
//! # }
//! ```

use crate::error::{ClientError, Result};
use crate::invoker::Invoker;
use crate::message::RestCall;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

struct Expectation {
    method: String,
    response: Result<Value>,
}

#[derive(Default)]
struct MockState {
    expectations: VecDeque<Expectation>,
    calls: Vec<RestCall>,
    mismatches: Vec<String>,
}

/// An invoker with an expectation queue, answering calls strictly in order.
///
/// Clones share the same queue and call log.
#[derive(Clone, Default)]
pub struct MockInvoker {
    state: Arc<Mutex<MockState>>,
}

impl MockInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the reply to the next call, which must be named `method` (e.g. `"findTopics"`).
    pub fn expect(&self, method: &str) -> ExpectationBuilder {
        ExpectationBuilder {
            method: method.to_string(),
            state: Arc::clone(&self.state),
        }
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<RestCall> {
        self.lock().calls.clone()
    }

    /// Resolved URL paths of every call received so far.
    pub fn paths(&self) -> Vec<String> {
        self.lock()
            .calls
            .iter()
            .map(|call| call.resolve_path().unwrap_or_else(|e| e.to_string()))
            .collect()
    }

    /// Verifies that all expectations were met and no call was unexpected.
    pub fn verify(&self) {
        let state = self.lock();
        if !state.mismatches.is_empty() {
            panic!("Unexpected calls: {}", state.mismatches.join("; "));
        }
        if !state.expectations.is_empty() {
            let remaining: Vec<&str> = state
                .expectations
                .iter()
                .map(|e| e.method.as_str())
                .collect();
            panic!(
                "Not all expectations were met. {} remaining: {}",
                remaining.len(),
                remaining.join(", ")
            );
        }
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl Invoker for MockInvoker {
    async fn invoke(&self, call: RestCall) -> Result<Value> {
        let mut state = self.lock();
        let method = call.method_name.clone();
        state.calls.push(call);

        match state.expectations.pop_front() {
            Some(expectation) if expectation.method == method => expectation.response,
            Some(expectation) => {
                let mismatch = format!("expected {}, got {method}", expectation.method);
                state.mismatches.push(mismatch.clone());
                Err(ClientError::server_fault(&method, None, mismatch))
            }
            None => {
                let mismatch = format!("no expectation for {method}");
                state.mismatches.push(mismatch.clone());
                Err(ClientError::server_fault(&method, None, mismatch))
            }
        }
    }
}

/// Builder for one queued reply.
pub struct ExpectationBuilder {
    method: String,
    state: Arc<Mutex<MockState>>,
}

impl ExpectationBuilder {
    /// Replies with `body`, as the server's JSON envelope.
    pub fn return_ok(self, body: Value) {
        self.push(Ok(body));
    }

    /// Replies with `error`, as if the server (or transport) had raised it.
    pub fn return_err(self, error: ClientError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Value>) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.expectations.push_back(Expectation {
            method: self.method,
            response,
        });
    }
}
