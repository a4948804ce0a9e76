pub mod dispatcher;
pub mod domain;
pub mod ports;

pub use dispatcher::{
    Acknowledgment, DispatchOutcome, SubmissionDispatcher, SubmitOutcome, DEBOUNCE_WINDOW_MS,
};
pub use domain::{CollectionPayload, OrderSubmission, OrderTotals, UNIT_PRICE};
pub use ports::{Clock, CollectionEndpoint, PortError, PortResult, SystemClock};
