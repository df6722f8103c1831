use std::time::Duration;

use crate::controller::RequestId;
use crate::TimerKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// (Re)start the timer; a running timer of the same kind is cancelled.
    StartTimer {
        timer: TimerKind,
        generation: u64,
        delay: Duration,
    },
    CancelTimer { timer: TimerKind },
    /// Replace the page URL without a new history entry. `None` removes the
    /// parameter.
    ReplaceQueryParam { name: String, value: Option<String> },
    StartConversion { request_id: RequestId, location: String },
    CancelConversion { request_id: RequestId },
}
