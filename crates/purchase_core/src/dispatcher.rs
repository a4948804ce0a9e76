//! crates/purchase_core/src/dispatcher.rs
//!
//! The submission guard and dispatcher: debounces repeated submits, derives the
//! order totals, forwards the payload to the collection endpoint and reports
//! completion to the caller whatever the endpoint did.

use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::domain::{CollectionPayload, OrderSubmission};
use crate::ports::{Clock, CollectionEndpoint, PortError};

/// Minimum interval, in milliseconds, between two accepted submissions.
pub const DEBOUNCE_WINDOW_MS: i64 = 1000;

//=========================================================================================
// Outcomes
//=========================================================================================

/// What happened to the outbound call of an accepted submission.
///
/// Both variants lead to the same [`SubmitOutcome::Completed`] signal; the
/// distinction is kept for logs and tests only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Sent,
    SendFailed(PortError),
}

/// The completion signal for one accepted submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acknowledgment {
    pub submission_id: Uuid,
    pub payload: CollectionPayload,
    pub dispatch: DispatchOutcome,
}

/// Result of a call to [`SubmissionDispatcher::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Arrived inside the debounce window and was dropped. Nothing was sent.
    Debounced,
    /// The payload was handed to the endpoint and the attempt has settled.
    Completed(Acknowledgment),
}

impl SubmitOutcome {
    pub fn acknowledgment(&self) -> Option<&Acknowledgment> {
        match self {
            SubmitOutcome::Completed(ack) => Some(ack),
            SubmitOutcome::Debounced => None,
        }
    }
}

//=========================================================================================
// The Dispatcher
//=========================================================================================

pub struct SubmissionDispatcher {
    endpoint: Arc<dyn CollectionEndpoint>,
    clock: Arc<dyn Clock>,
    last_submit_time: Mutex<Option<DateTime<Utc>>>,
    in_flight: watch::Sender<bool>,
}

impl SubmissionDispatcher {
    /// Creates a dispatcher with no previous submission and nothing in flight.
    pub fn new(endpoint: Arc<dyn CollectionEndpoint>, clock: Arc<dyn Clock>) -> Self {
        let (in_flight, _) = watch::channel(false);
        Self {
            endpoint,
            clock,
            last_submit_time: Mutex::new(None),
            in_flight,
        }
    }

    /// Whether a dispatch is currently outstanding.
    pub fn is_submitting(&self) -> bool {
        *self.in_flight.borrow()
    }

    /// A receiver that observes every change of the in-flight flag.
    pub fn subscribe_in_flight(&self) -> watch::Receiver<bool> {
        self.in_flight.subscribe()
    }

    /// Handles one form submission made at `now`.
    ///
    /// Submissions less than [`DEBOUNCE_WINDOW_MS`] after the last accepted one
    /// are dropped without side effects. Accepted submissions always end in
    /// [`SubmitOutcome::Completed`], even when the endpoint call fails.
    pub async fn submit(&self, order: &OrderSubmission, now: DateTime<Utc>) -> SubmitOutcome {
        if !self.try_accept(now) {
            debug!("Submission ignored: inside the debounce window.");
            return SubmitOutcome::Debounced;
        }

        let submission_id = Uuid::new_v4();
        self.in_flight.send_replace(true);

        let payload = CollectionPayload::from_submission(order, self.clock.now());
        info!(
            %submission_id,
            total_price = payload.total_price,
            "Dispatching order to collection endpoint."
        );

        let dispatch = match self.endpoint.deliver(&payload).await {
            Ok(()) => DispatchOutcome::Sent,
            Err(e) => {
                error!(%submission_id, error = %e, "Error submitting order");
                DispatchOutcome::SendFailed(e)
            }
        };

        self.in_flight.send_replace(false);

        SubmitOutcome::Completed(Acknowledgment {
            submission_id,
            payload,
            dispatch,
        })
    }

    /// Checks the debounce window and, if open, records `now` as the last
    /// accepted submit time.
    fn try_accept(&self, now: DateTime<Utc>) -> bool {
        let mut last = self
            .last_submit_time
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(previous) = *last {
            if (now - previous).num_milliseconds() < DEBOUNCE_WINDOW_MS {
                return false;
            }
        }

        *last = Some(now);
        true
    }
}
