use std::time::Duration;

use coord_logging::coord_debug;
use serde_json::Value;

use crate::debounce::{DebounceTimer, Debounced};
use crate::response::{ConversionResponse, ConvertSuccess};

pub type RequestId = u64;

/// Message used when a transport failure carries no message of its own.
pub const REQUEST_FAILED: &str = "Request failed";

/// The tri-state the view renders.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConversionState {
    pub data: Option<ConvertSuccess>,
    pub loading: bool,
    pub error: Option<String>,
}

/// How a conversion request ended, as reported by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Settlement {
    /// The service answered with a parseable body, whatever its status.
    Body(Value),
    /// Timeout, network error or unparseable body.
    TransportFailed { message: Option<String> },
    Cancelled,
}

/// Request-level work the controller asks the runtime to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestAction {
    Start { request_id: RequestId, location: String },
    Cancel { request_id: RequestId },
}

/// Owns the conversion tri-state and the single in-flight request slot.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionController {
    delay: Duration,
    debounced: Debounced<String>,
    state: ConversionState,
    in_flight: Option<RequestId>,
    last_request: RequestId,
}

impl ConversionController {
    pub fn new(initial: impl Into<String>, delay: Duration) -> Self {
        Self {
            delay,
            debounced: Debounced::new(initial.into()),
            state: ConversionState::default(),
            in_flight: None,
            last_request: 0,
        }
    }

    pub fn state(&self) -> &ConversionState {
        &self.state
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    pub fn is_pending(&self) -> bool {
        self.debounced.is_pending()
    }

    /// Reacts to the initial debounced value.
    pub fn mount(&mut self) -> Vec<RequestAction> {
        let initial = self.debounced.value().clone();
        self.on_debounced(&initial)
    }

    /// Feeds a new input value into the debounce stage.
    pub fn input_changed(&mut self, value: impl Into<String>) -> Option<DebounceTimer> {
        self.debounced.push(value.into(), self.delay)
    }

    /// Applies a fired debounce timer.
    pub fn on_timer(&mut self, generation: u64) -> Vec<RequestAction> {
        match self.debounced.elapse(generation) {
            Some(value) => self.on_debounced(&value),
            None => Vec::new(),
        }
    }

    /// Applies the outcome of a request. Returns false when the outcome was
    /// discarded because the request is no longer the live one.
    pub fn settle(&mut self, request_id: RequestId, settlement: Settlement) -> bool {
        if self.in_flight != Some(request_id) {
            coord_debug!(
                "Discarding settlement of request {} (live: {:?})",
                request_id,
                self.in_flight
            );
            return false;
        }
        let outcome = match settlement {
            Settlement::Cancelled => return false,
            Settlement::Body(body) => match ConversionResponse::classify(&body) {
                ConversionResponse::Success(success) => Ok(success),
                ConversionResponse::Failure(failure) => Err(failure.message().to_string()),
            },
            Settlement::TransportFailed { message } => Err(message
                .filter(|text| !text.is_empty())
                .unwrap_or_else(|| REQUEST_FAILED.to_string())),
        };

        self.in_flight = None;
        self.state.loading = false;
        match outcome {
            Ok(success) => {
                self.state.data = Some(success);
                self.state.error = None;
            }
            Err(message) => {
                self.state.data = None;
                self.state.error = Some(message);
            }
        }
        true
    }

    /// Cancels the outstanding request and the pending timer for good.
    pub fn teardown(&mut self) -> Vec<RequestAction> {
        self.debounced.teardown();
        self.state.loading = false;
        self.cancel_in_flight().into_iter().collect()
    }

    fn on_debounced(&mut self, value: &str) -> Vec<RequestAction> {
        let location = value.trim();
        let mut actions: Vec<RequestAction> = self.cancel_in_flight().into_iter().collect();

        if location.is_empty() {
            self.state = ConversionState::default();
            return actions;
        }

        self.last_request += 1;
        let request_id = self.last_request;
        self.in_flight = Some(request_id);
        self.state.loading = true;
        self.state.error = None;
        self.state.data = None;
        actions.push(RequestAction::Start {
            request_id,
            location: location.to_string(),
        });
        actions
    }

    fn cancel_in_flight(&mut self) -> Option<RequestAction> {
        self.in_flight
            .take()
            .map(|request_id| RequestAction::Cancel { request_id })
    }
}
