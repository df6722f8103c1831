//! Coordinate lookup core: pure state machine for the input -> URL -> request
//! pipeline and view-model helpers.
mod controller;
mod debounce;
mod effect;
mod msg;
mod query;
mod response;
mod state;
mod store;
mod update;
mod view_model;

pub use controller::{
    ConversionController, ConversionState, RequestAction, RequestId, Settlement, REQUEST_FAILED,
};
pub use debounce::{DebounceTimer, Debounced};
pub use effect::Effect;
pub use msg::Msg;
pub use query::{read_param, strip_wrapping_quotes, write_param};
pub use response::{
    ConversionResponse, ConvertFailure, ConvertSuccess, LinkValue, CONVERSION_FAILED,
};
pub use state::{
    AppState, PipelineSettings, TimerKind, DEFAULT_CONVERSION_DEBOUNCE, DEFAULT_PARAM,
    DEFAULT_URL_DEBOUNCE,
};
pub use store::{ParamWrite, QueryParamStore};
pub use update::update;
pub use view_model::{AppViewModel, ResultView, RowView, CODE_ORDER, MAP_LINK_ORDER};
