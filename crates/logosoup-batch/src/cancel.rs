// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Batch cancellation. Each batch gets its own token; starting a new batch
// through a `BatchTracker` cancels the one before it, so only the latest
// request can ever publish results.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tokio::sync::Notify;
use tracing::debug;
use uuid::Uuid;

/// Unique identifier for one batch invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BatchId(pub Uuid);

impl BatchId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Default)]
struct CancelState {
    cancelled: AtomicBool,
    notify: Notify,
}

/// Cancellation handle for one batch. Clones share the same flag.
#[derive(Debug, Clone)]
pub struct BatchToken {
    id: BatchId,
    state: Arc<CancelState>,
}

impl BatchToken {
    pub fn new() -> Self {
        Self {
            id: BatchId::new(),
            state: Arc::new(CancelState::default()),
        }
    }

    pub fn id(&self) -> BatchId {
        self.id
    }

    pub fn cancel(&self) {
        if !self.state.cancelled.swap(true, Ordering::SeqCst) {
            debug!(batch_id = %self.id, "Batch cancelled");
        }
        self.state.notify.notify_waiters();
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.cancelled.load(Ordering::SeqCst)
    }

    /// Resolves once the token is cancelled.
    pub async fn cancelled(&self) {
        loop {
            // Register before checking the flag so a concurrent `cancel`
            // cannot slip between the two.
            let notified = self.state.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}

impl Default for BatchToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Hands out batch tokens and remembers which one is current.
#[derive(Debug, Default)]
pub struct BatchTracker {
    current: Mutex<Option<BatchToken>>,
}

impl BatchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new batch, cancelling whichever batch was current.
    pub fn start(&self) -> BatchToken {
        let token = BatchToken::new();
        let mut current = self.current.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(previous) = current.replace(token.clone()) {
            debug!(superseded = %previous.id(), by = %token.id(), "Superseding batch");
            previous.cancel();
        }
        token
    }

    /// Cancel the current batch, if any, without starting another.
    pub fn cancel_current(&self) {
        let mut current = self.current.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(previous) = current.take() {
            previous.cancel();
        }
    }

    /// Whether `id` is still the latest batch and has not been cancelled.
    pub fn is_current(&self, id: BatchId) -> bool {
        let current = self.current.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        current
            .as_ref()
            .is_some_and(|token| token.id() == id && !token.is_cancelled())
    }
}
