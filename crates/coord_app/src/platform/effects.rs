use std::collections::HashMap;
use std::sync::{mpsc, Arc};

use coord_core::{write_param, Effect, Msg, RequestId, Settlement, TimerKind};
use coord_engine::{
    CancellationToken, ClientSettings, ConvertClient, EngineError, EngineEvent, EngineHandle,
    EventSink, TimerId,
};
use coord_logging::{coord_debug, coord_info, coord_trace};

use super::history::History;

/// Executes core effects against the engine and the page history.
///
/// Owns at most one live conversion and one timer per [`TimerKind`]; starting
/// either cancels whatever held the slot before.
pub struct EffectRunner {
    engine: EngineHandle,
    in_flight: Option<(RequestId, CancellationToken)>,
    timers: HashMap<TimerKind, CancellationToken>,
}

impl EffectRunner {
    pub fn new(settings: ClientSettings, msg_tx: mpsc::Sender<Msg>) -> Result<Self, EngineError> {
        let engine = EngineHandle::new(settings, Arc::new(MsgSink { msg_tx }))?;
        Ok(Self::from_engine(engine))
    }

    pub fn with_client(
        client: Arc<dyn ConvertClient>,
        msg_tx: mpsc::Sender<Msg>,
    ) -> Result<Self, EngineError> {
        let engine = EngineHandle::with_client(client, Arc::new(MsgSink { msg_tx }))?;
        Ok(Self::from_engine(engine))
    }

    fn from_engine(engine: EngineHandle) -> Self {
        Self {
            engine,
            in_flight: None,
            timers: HashMap::new(),
        }
    }

    pub fn run(&mut self, effects: Vec<Effect>, history: &mut dyn History) {
        for effect in effects {
            match effect {
                Effect::StartTimer {
                    timer,
                    generation,
                    delay,
                } => {
                    let cancel = CancellationToken::new();
                    if let Some(previous) = self.timers.insert(timer, cancel.clone()) {
                        previous.cancel();
                    }
                    self.engine
                        .start_timer(timer_id(timer, generation), delay, cancel);
                }
                Effect::CancelTimer { timer } => {
                    if let Some(cancel) = self.timers.remove(&timer) {
                        coord_trace!("Cancel {:?} timer", timer);
                        cancel.cancel();
                    }
                }
                Effect::ReplaceQueryParam { name, value } => {
                    let current = history.current();
                    let next = write_param(current, &name, value.as_deref().unwrap_or(""));
                    if next != *current {
                        coord_debug!("Replace URL {} -> {}", current, next);
                        history.replace(next);
                    }
                }
                Effect::StartConversion {
                    request_id,
                    location,
                } => {
                    let cancel = CancellationToken::new();
                    if let Some((previous, token)) =
                        self.in_flight.replace((request_id, cancel.clone()))
                    {
                        coord_debug!("Request {} superseded by {}", previous, request_id);
                        token.cancel();
                    }
                    self.engine.convert(request_id, location, cancel);
                }
                Effect::CancelConversion { request_id } => {
                    if matches!(&self.in_flight, Some((id, _)) if *id == request_id) {
                        if let Some((_, token)) = self.in_flight.take() {
                            coord_debug!("Cancel request {}", request_id);
                            token.cancel();
                        }
                    }
                }
            }
        }
    }

    /// Frees the conversion slot once `request_id` has reported back.
    pub fn request_settled(&mut self, request_id: RequestId) {
        if matches!(&self.in_flight, Some((id, _)) if *id == request_id) {
            self.in_flight = None;
        }
    }

    pub fn has_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn shutdown(&mut self) {
        for (_, cancel) in self.timers.drain() {
            cancel.cancel();
        }
        if let Some((request_id, token)) = self.in_flight.take() {
            coord_info!("Shutdown cancels request {}", request_id);
            token.cancel();
        }
    }
}

impl Drop for EffectRunner {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Forwards engine events into the app's message queue.
struct MsgSink {
    msg_tx: mpsc::Sender<Msg>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let msg = match event {
            EngineEvent::TimerElapsed(TimerId { slot, generation }) => {
                let Some(timer) = map_slot(slot) else {
                    return;
                };
                Msg::TimerElapsed { timer, generation }
            }
            EngineEvent::ConversionCompleted { request_id, result } => {
                let settlement = match result {
                    Ok(body) => Settlement::Body(body),
                    Err(err) if err.is_cancelled() => Settlement::Cancelled,
                    Err(err) => Settlement::TransportFailed {
                        message: Some(err.message).filter(|message| !message.is_empty()),
                    },
                };
                Msg::ConversionSettled {
                    request_id,
                    settlement,
                }
            }
        };
        let _ = self.msg_tx.send(msg);
    }
}

fn timer_id(timer: TimerKind, generation: u64) -> TimerId {
    let slot = match timer {
        TimerKind::UrlSync => 0,
        TimerKind::Conversion => 1,
    };
    TimerId { slot, generation }
}

fn map_slot(slot: u32) -> Option<TimerKind> {
    match slot {
        0 => Some(TimerKind::UrlSync),
        1 => Some(TimerKind::Conversion),
        _ => None,
    }
}
