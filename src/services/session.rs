// src/services/session.rs
//! Verification session for a single certificate view.
//!
//! A view re-runs verification only when the identity of its inputs changes
//! (request id, title, description, image reference or stored hash). Each
//! attempt is tagged with a generation token; an attempt may only publish its
//! result while its token is still the latest, so a slow attempt for
//! abandoned inputs can never overwrite the result for newer ones.

use crate::models::certificate::Certificate;
use crate::models::verification::{VerificationResult, VerificationState};
use crate::services::verifier::verify;
use log::debug;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Inputs whose change triggers a new verification attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationKey {
    pub request_id: String,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub stored_hash: String,
}

impl VerificationKey {
    pub fn from_certificate(certificate: &Certificate) -> Self {
        VerificationKey {
            request_id: certificate.request_id.clone(),
            title: certificate.title.clone(),
            description: certificate.description.clone(),
            image_url: certificate.image_url.clone(),
            stored_hash: certificate.stored_hash.clone(),
        }
    }
}

#[derive(Debug, Default)]
struct Tracker {
    generation: u64,
    key: Option<VerificationKey>,
}

struct Shared {
    tracker: Mutex<Tracker>,
    state: watch::Sender<VerificationState>,
}

impl Shared {
    fn tracker(&self) -> MutexGuard<'_, Tracker> {
        self.tracker.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Publishes `result` if `token` is still the current generation.
    fn publish(&self, token: u64, result: VerificationResult) -> bool {
        let tracker = self.tracker();
        if tracker.generation != token {
            debug!(
                "discarding verification result of generation {} (current {})",
                token, tracker.generation
            );
            return false;
        }
        self.state.send_replace(VerificationState::Resolved(result));
        true
    }
}

/// Owns the verification state of one certificate view.
///
/// Cloning yields another handle to the same session.
#[derive(Clone)]
pub struct VerificationSession {
    shared: Arc<Shared>,
}

impl VerificationSession {
    /// Creates a session in the pending state.
    pub fn new() -> Self {
        let (state, _) = watch::channel(VerificationState::Pending);
        VerificationSession {
            shared: Arc::new(Shared {
                tracker: Mutex::new(Tracker::default()),
                state,
            }),
        }
    }

    /// Starts verification if the certificate's inputs differ from the last
    /// observed ones.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Returns
    /// - `Some(handle)` for the newly spawned attempt
    /// - `None` if the inputs are unchanged and no attempt was started
    pub fn observe(&self, certificate: &Certificate) -> Option<JoinHandle<()>> {
        let key = VerificationKey::from_certificate(certificate);
        let token = {
            let mut tracker = self.shared.tracker();
            if tracker.key.as_ref() == Some(&key) {
                return None;
            }
            tracker.generation += 1;
            tracker.key = Some(key);
            self.shared.state.send_replace(VerificationState::Pending);
            tracker.generation
        };

        debug!(
            "starting verification generation {} for {}",
            token, certificate.request_id
        );
        let shared = Arc::clone(&self.shared);
        let certificate = certificate.clone();
        Some(tokio::spawn(async move {
            let result = verify(&certificate, &certificate.stored_hash).await;
            shared.publish(token, result);
        }))
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> VerificationState {
        self.shared.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<VerificationState> {
        self.shared.state.subscribe()
    }

    /// Number of attempts started so far.
    pub fn generation(&self) -> u64 {
        self.shared.tracker().generation
    }
}

impl Default for VerificationSession {
    fn default() -> Self {
        Self::new()
    }
}
