//! services/api/src/web/state.rs
//!
//! Defines the application's shared state and the per-page session state.
//!
//! Each open purchase page owns its own submission guard and success modal,
//! so one customer's submit never debounces or acknowledges another's.

use crate::config::Config;
use purchase_core::dispatcher::SubmissionDispatcher;
use purchase_core::ports::{Clock, CollectionEndpoint};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub clock: Arc<dyn Clock>,
    pub sessions: Arc<PageSessions>,
}

//=========================================================================================
// PageSession (Specific to One Open Purchase Page)
//=========================================================================================

/// The state owned by a single purchase page.
pub struct PageSession {
    pub dispatcher: SubmissionDispatcher,
    pub success_modal: SuccessModal,
}

/// All page sessions seen so far, keyed by the id the page sends with each request.
pub struct PageSessions {
    endpoint: Arc<dyn CollectionEndpoint>,
    clock: Arc<dyn Clock>,
    sessions: Mutex<HashMap<Uuid, Arc<PageSession>>>,
}

impl PageSessions {
    pub fn new(endpoint: Arc<dyn CollectionEndpoint>, clock: Arc<dyn Clock>) -> Self {
        Self {
            endpoint,
            clock,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the session for `page_id`, creating a fresh one on first use.
    pub fn get_or_create(&self, page_id: Uuid) -> Arc<PageSession> {
        let mut sessions = self
            .sessions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        sessions
            .entry(page_id)
            .or_insert_with(|| {
                Arc::new(PageSession {
                    dispatcher: SubmissionDispatcher::new(
                        self.endpoint.clone(),
                        self.clock.clone(),
                    ),
                    success_modal: SuccessModal::default(),
                })
            })
            .clone()
    }
}

//=========================================================================================
// SuccessModal
//=========================================================================================

/// Open/closed state of the acknowledgment surface.
#[derive(Debug, Default)]
pub struct SuccessModal {
    open: AtomicBool,
}

impl SuccessModal {
    pub fn open(&self) {
        self.open.store(true, Ordering::SeqCst);
    }

    /// Closes the modal. Closing an already closed modal does nothing.
    pub fn dismiss(&self) {
        self.open.store(false, Ordering::SeqCst);
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use purchase_core::domain::CollectionPayload;
    use purchase_core::ports::{PortResult, SystemClock};

    struct NullEndpoint;

    #[async_trait]
    impl CollectionEndpoint for NullEndpoint {
        async fn deliver(&self, _payload: &CollectionPayload) -> PortResult<()> {
            Ok(())
        }
    }

    fn sessions() -> PageSessions {
        PageSessions::new(Arc::new(NullEndpoint), Arc::new(SystemClock))
    }

    #[test]
    fn modal_starts_closed_and_toggles() {
        let modal = SuccessModal::default();
        assert!(!modal.is_open());

        modal.open();
        assert!(modal.is_open());

        modal.dismiss();
        modal.dismiss();
        assert!(!modal.is_open());
    }

    #[test]
    fn same_page_id_returns_the_same_session() {
        let sessions = sessions();
        let page_id = Uuid::new_v4();

        let first = sessions.get_or_create(page_id);
        let second = sessions.get_or_create(page_id);

        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn different_page_ids_do_not_share_the_modal() {
        let sessions = sessions();
        let a = sessions.get_or_create(Uuid::new_v4());
        let b = sessions.get_or_create(Uuid::new_v4());

        a.success_modal.open();

        assert!(a.success_modal.is_open());
        assert!(!b.success_modal.is_open());
    }

    #[tokio::test]
    async fn different_page_ids_are_debounced_independently() {
        let sessions = sessions();
        let a = sessions.get_or_create(Uuid::new_v4());
        let b = sessions.get_or_create(Uuid::new_v4());
        let now: DateTime<Utc> = Utc::now();
        let order = purchase_core::domain::OrderSubmission {
            name: "Hana".to_string(),
            phone: "01033333333".to_string(),
            governorate: "Cairo".to_string(),
            area: "Heliopolis".to_string(),
            address: "1 Merghany St".to_string(),
            straight_quantity: 1,
            curved_quantity: 0,
            curved_gold_quantity: 0,
        };

        let first = a.dispatcher.submit(&order, now).await;
        let second = b.dispatcher.submit(&order, now).await;

        assert!(first.acknowledgment().is_some());
        assert!(second.acknowledgment().is_some());
    }
}
