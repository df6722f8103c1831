use crate::controller::RequestAction;
use crate::debounce::DebounceTimer;
use crate::store::ParamWrite;
use crate::{AppState, Effect, Msg, TimerKind};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    if !state.is_mounted() && !matches!(msg, Msg::Mounted) {
        return (state, Vec::new());
    }

    let effects = match msg {
        Msg::Mounted => {
            if !state.set_mounted() {
                return (state, Vec::new());
            }
            let mut effects = Vec::new();
            push_write(&mut effects, state.store_mut().mount());
            push_requests(&mut effects, state.controller_mut().mount());
            state.mark_dirty();
            effects
        }
        Msg::InputChanged(text) => match state.store_mut().set_value(text) {
            Some(timer) => {
                state.mark_dirty();
                vec![start_timer(TimerKind::UrlSync, timer)]
            }
            None => Vec::new(),
        },
        Msg::Navigated(url) => {
            let had_pending = state.store_mut().is_pending();
            let changed = state.store_mut().on_navigation(&url);
            let mut effects = Vec::new();
            if had_pending {
                effects.push(Effect::CancelTimer {
                    timer: TimerKind::UrlSync,
                });
            }
            if let Some(value) = changed {
                if let Some(timer) = state.controller_mut().input_changed(value) {
                    effects.push(start_timer(TimerKind::Conversion, timer));
                }
            }
            state.mark_dirty();
            effects
        }
        Msg::TimerElapsed {
            timer: TimerKind::UrlSync,
            generation,
        } => {
            let mut effects = Vec::new();
            if let Some((settled, write)) = state.store_mut().on_timer(generation) {
                push_write(&mut effects, write);
                if let Some(timer) = state.controller_mut().input_changed(settled) {
                    effects.push(start_timer(TimerKind::Conversion, timer));
                }
            }
            effects
        }
        Msg::TimerElapsed {
            timer: TimerKind::Conversion,
            generation,
        } => {
            let mut effects = Vec::new();
            let actions = state.controller_mut().on_timer(generation);
            if !actions.is_empty() {
                state.mark_dirty();
            }
            push_requests(&mut effects, actions);
            effects
        }
        Msg::ConversionSettled {
            request_id,
            settlement,
        } => {
            if state.controller_mut().settle(request_id, settlement) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::Unmounted => {
            if !state.set_torn_down() {
                return (state, Vec::new());
            }
            let mut effects = Vec::new();
            if state.store_mut().teardown() {
                effects.push(Effect::CancelTimer {
                    timer: TimerKind::UrlSync,
                });
            }
            let conversion_pending = state.controller_mut().is_pending();
            let actions = state.controller_mut().teardown();
            if conversion_pending {
                effects.push(Effect::CancelTimer {
                    timer: TimerKind::Conversion,
                });
            }
            push_requests(&mut effects, actions);
            state.mark_dirty();
            effects
        }
    };

    (state, effects)
}

fn start_timer(timer: TimerKind, debounce: DebounceTimer) -> Effect {
    Effect::StartTimer {
        timer,
        generation: debounce.generation,
        delay: debounce.delay,
    }
}

fn push_write(effects: &mut Vec<Effect>, write: Option<ParamWrite>) {
    if let Some(ParamWrite { name, value }) = write {
        effects.push(Effect::ReplaceQueryParam { name, value });
    }
}

fn push_requests(effects: &mut Vec<Effect>, actions: Vec<RequestAction>) {
    effects.extend(actions.into_iter().map(|action| match action {
        RequestAction::Start {
            request_id,
            location,
        } => Effect::StartConversion {
            request_id,
            location,
        },
        RequestAction::Cancel { request_id } => Effect::CancelConversion { request_id },
    }));
}
