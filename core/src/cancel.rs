//! Cancellation handles keyed by caller-chosen tokens.
//!
//! Calls that share a token share one `CancellationToken`. The mapping lives
//! while at least one of those calls is in flight; `abort` cancels the
//! handle and forgets it, so a later call with the same token starts fresh.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use tokio_util::sync::CancellationToken;

#[derive(Debug)]
struct Entry {
    handle: CancellationToken,
    generation: u64,
    in_flight: usize,
}

#[derive(Debug, Default)]
struct Entries {
    by_token: HashMap<String, Entry>,
    next_generation: u64,
}

/// One call's claim on a shared handle. Hand it back to
/// [`CancelRegistry::release`] when the call finishes.
#[derive(Debug, Clone)]
pub struct Registration {
    pub handle: CancellationToken,
    generation: u64,
}

#[derive(Debug, Default)]
pub struct CancelRegistry {
    entries: Mutex<Entries>,
}

impl CancelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a call under `token`, reusing the handle already there.
    pub fn acquire(&self, token: &str) -> Registration {
        let mut entries = self.lock();
        let Entries {
            by_token,
            next_generation,
        } = &mut *entries;
        let entry = by_token.entry(token.to_string()).or_insert_with(|| {
            *next_generation += 1;
            Entry {
                handle: CancellationToken::new(),
                generation: *next_generation,
                in_flight: 0,
            }
        });
        entry.in_flight += 1;
        Registration {
            handle: entry.handle.clone(),
            generation: entry.generation,
        }
    }

    /// Mark one call registered under `token` as finished.
    pub fn release(&self, token: &str, registration: &Registration) {
        let mut entries = self.lock();
        let Some(entry) = entries.by_token.get_mut(token) else {
            return;
        };
        // After an abort the token may already map to a newer handle.
        if entry.generation != registration.generation {
            return;
        }
        entry.in_flight = entry.in_flight.saturating_sub(1);
        if entry.in_flight == 0 {
            entries.by_token.remove(token);
        }
    }

    /// Cancel every in-flight call using `token`. Returns false when nothing
    /// was registered under it.
    pub fn abort(&self, token: &str) -> bool {
        match self.lock().by_token.remove(token) {
            Some(entry) => {
                entry.handle.cancel();
                true
            }
            None => false,
        }
    }

    pub fn is_registered(&self, token: &str) -> bool {
        self.lock().by_token.contains_key(token)
    }

    fn lock(&self) -> MutexGuard<'_, Entries> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
