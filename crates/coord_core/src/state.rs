use std::time::Duration;

use url::Url;

use crate::controller::{ConversionController, ConversionState};
use crate::store::QueryParamStore;
use crate::view_model::AppViewModel;

/// Query parameter that carries the location text.
pub const DEFAULT_PARAM: &str = "location";
pub const DEFAULT_URL_DEBOUNCE: Duration = Duration::from_millis(300);
pub const DEFAULT_CONVERSION_DEBOUNCE: Duration = Duration::from_millis(350);

/// The two debounce stages of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimerKind {
    /// Store stage: raw input -> URL.
    UrlSync,
    /// Controller stage: debounced input -> request.
    Conversion,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSettings {
    pub param: String,
    pub url_debounce: Duration,
    pub conversion_debounce: Duration,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            param: DEFAULT_PARAM.to_string(),
            url_debounce: DEFAULT_URL_DEBOUNCE,
            conversion_debounce: DEFAULT_CONVERSION_DEBOUNCE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    store: QueryParamStore,
    controller: ConversionController,
    mounted: bool,
    torn_down: bool,
    dirty: bool,
}

/// Unmounted state with an empty input and default settings.
impl Default for AppState {
    fn default() -> Self {
        let settings = PipelineSettings::default();
        let store = QueryParamStore::with_value(settings.param.clone(), settings.url_debounce, "");
        Self::with_store(&settings, store)
    }
}

impl AppState {
    /// Builds the state for a page opened at `url`. `Msg::Mounted` must be
    /// the first message applied.
    pub fn new(settings: &PipelineSettings, url: &Url) -> Self {
        Self::with_store(
            settings,
            QueryParamStore::new(settings.param.clone(), settings.url_debounce, url),
        )
    }

    fn with_store(settings: &PipelineSettings, store: QueryParamStore) -> Self {
        let controller =
            ConversionController::new(store.debounced().to_string(), settings.conversion_debounce);
        Self {
            store,
            controller,
            mounted: false,
            torn_down: false,
            dirty: false,
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel::build(self.store.value(), self.controller.state(), self.dirty)
    }

    pub fn input(&self) -> &str {
        self.store.value()
    }

    pub fn conversion(&self) -> &ConversionState {
        self.controller.state()
    }

    /// True when no timer is pending and no request is outstanding.
    pub fn is_settled(&self) -> bool {
        !self.store.is_pending()
            && !self.controller.is_pending()
            && self.controller.in_flight().is_none()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted && !self.torn_down
    }

    /// Returns and clears the dirty flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn store_mut(&mut self) -> &mut QueryParamStore {
        &mut self.store
    }

    pub(crate) fn controller_mut(&mut self) -> &mut ConversionController {
        &mut self.controller
    }

    pub(crate) fn set_mounted(&mut self) -> bool {
        !std::mem::replace(&mut self.mounted, true)
    }

    pub(crate) fn set_torn_down(&mut self) -> bool {
        !std::mem::replace(&mut self.torn_down, true)
    }
}
