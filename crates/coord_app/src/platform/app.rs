use std::sync::{mpsc, Arc};
use std::time::{Duration, Instant};

use coord_core::{update, AppState, AppViewModel, Msg};
use coord_engine::{ConvertClient, EngineError};
use coord_logging::{coord_debug, coord_info};
use url::Url;

use super::config::AppConfig;
use super::effects::EffectRunner;
use super::history::History;

/// Longest single wait inside a pump, so navigation events raised between
/// engine events are still picked up promptly.
const POLL_SLICE: Duration = Duration::from_millis(10);

/// The lookup page: pure state, an effect runner and the page history.
///
/// Messages from the engine queue up on a channel and are applied only while
/// the caller pumps, so every state transition happens on the caller's
/// thread.
pub struct App<H: History> {
    state: AppState,
    runner: EffectRunner,
    history: H,
    msg_rx: mpsc::Receiver<Msg>,
    nav_rx: mpsc::Receiver<Url>,
}

impl<H: History> App<H> {
    /// Mounts the page against a live conversion service.
    pub fn mount(config: &AppConfig, history: H) -> Result<Self, EngineError> {
        let (msg_tx, msg_rx) = mpsc::channel();
        let runner = EffectRunner::new(config.client_settings(), msg_tx)?;
        Ok(Self::start(config, history, runner, msg_rx))
    }

    pub fn mount_with_client(
        config: &AppConfig,
        history: H,
        client: Arc<dyn ConvertClient>,
    ) -> Result<Self, EngineError> {
        let (msg_tx, msg_rx) = mpsc::channel();
        let runner = EffectRunner::with_client(client, msg_tx)?;
        Ok(Self::start(config, history, runner, msg_rx))
    }

    fn start(
        config: &AppConfig,
        mut history: H,
        runner: EffectRunner,
        msg_rx: mpsc::Receiver<Msg>,
    ) -> Self {
        let (nav_tx, nav_rx) = mpsc::channel();
        history.subscribe(nav_tx);
        let state = AppState::new(&config.pipeline_settings(), history.current());
        coord_info!("Mounted at {}", history.current());

        let mut app = Self {
            state,
            runner,
            history,
            msg_rx,
            nav_rx,
        };
        app.dispatch(Msg::Mounted);
        app
    }

    /// One keystroke's worth of input: the field now holds `text`.
    pub fn type_input(&mut self, text: impl Into<String>) {
        self.dispatch(Msg::InputChanged(text.into()));
    }

    /// Follows a link to `url` within the page: a new history entry the
    /// page then reads its input from, without writing it back.
    pub fn open(&mut self, url: Url) {
        coord_info!("Open {}", url);
        self.history.push(url.clone());
        self.dispatch(Msg::Navigated(url));
    }

    pub fn dispatch(&mut self, msg: Msg) {
        if let Msg::ConversionSettled { request_id, .. } = &msg {
            self.runner.request_settled(*request_id);
        }
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.run(effects, &mut self.history);
    }

    /// Applies everything already queued without blocking.
    pub fn process_pending(&mut self) {
        self.drain_navigation();
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.dispatch(msg);
            self.drain_navigation();
        }
    }

    /// Pumps until no timer is pending and no request is in flight.
    /// Returns false when `max_wait` ran out first.
    pub fn pump_until_settled(&mut self, max_wait: Duration) -> bool {
        self.pump_until(max_wait, AppState::is_settled)
    }

    /// Pumps until `done` holds for the state, or `max_wait` runs out.
    pub fn pump_until(&mut self, max_wait: Duration, mut done: impl FnMut(&AppState) -> bool) -> bool {
        let deadline = Instant::now() + max_wait;
        loop {
            self.process_pending();
            if done(&self.state) {
                return true;
            }
            let now = Instant::now();
            if now >= deadline {
                coord_debug!("Pump gave up after {:?}", max_wait);
                return false;
            }
            match self.msg_rx.recv_timeout((deadline - now).min(POLL_SLICE)) {
                Ok(msg) => self.dispatch(msg),
                Err(mpsc::RecvTimeoutError::Timeout) => {}
                Err(mpsc::RecvTimeoutError::Disconnected) => return done(&self.state),
            }
        }
    }

    /// Pumps for exactly `duration`, whatever the state does meanwhile.
    pub fn pump_for(&mut self, duration: Duration) {
        self.pump_until(duration, |_| false);
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    /// True when the view changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        self.state.consume_dirty()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    /// Traversals made through this reference reach the page on the next
    /// pump.
    pub fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }

    pub fn url(&self) -> &Url {
        self.history.current()
    }

    /// Tears the page down: pending timers and the live request are
    /// cancelled and later results are ignored.
    pub fn unmount(&mut self) {
        if !self.state.is_mounted() {
            return;
        }
        self.dispatch(Msg::Unmounted);
        self.runner.shutdown();
        coord_info!("Unmounted at {}", self.history.current());
    }

    fn drain_navigation(&mut self) {
        while let Ok(url) = self.nav_rx.try_recv() {
            self.dispatch(Msg::Navigated(url));
        }
    }
}

impl<H: History> Drop for App<H> {
    fn drop(&mut self) {
        self.unmount();
    }
}
