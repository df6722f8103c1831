use url::Url;

use crate::controller::{RequestId, Settlement};
use crate::TimerKind;

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// The front end is up; evaluates the values read from the URL.
    Mounted,
    /// User edited the location input.
    InputChanged(String),
    /// Back/forward navigation landed on `Url`.
    Navigated(Url),
    /// A debounce timer fired.
    TimerElapsed { timer: TimerKind, generation: u64 },
    /// A conversion request ended.
    ConversionSettled {
        request_id: RequestId,
        settlement: Settlement,
    },
    /// The front end is going away; nothing may change state afterwards.
    Unmounted,
}
