use std::time::Duration;

use url::Url;

use crate::debounce::{DebounceTimer, Debounced};
use crate::query::read_param;

/// URL rewrite requested by the store.
///
/// `value: None` removes the parameter. The runtime applies it as a history
/// replace so no entry is added and nothing reloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamWrite {
    pub name: String,
    pub value: Option<String>,
}

/// String state mirrored into one query parameter of the page URL.
///
/// Reads come from the URL at construction and on navigation. Writes go out
/// only when the debounced value changes, never as a reaction to a read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParamStore {
    name: String,
    delay: Duration,
    value: String,
    debounced: Debounced<String>,
    skip_first_write: bool,
}

impl QueryParamStore {
    pub fn new(name: impl Into<String>, delay: Duration, url: &Url) -> Self {
        let name = name.into();
        let value = read_param(url, &name);
        Self::with_value(name, delay, value)
    }

    /// Store seeded with `value` as if it had been read from the URL.
    pub fn with_value(name: impl Into<String>, delay: Duration, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        Self {
            debounced: Debounced::new(value.clone()),
            name,
            delay,
            value,
            skip_first_write: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw value, updated on every edit.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn debounced(&self) -> &str {
        self.debounced.value()
    }

    pub fn is_pending(&self) -> bool {
        self.debounced.is_pending()
    }

    /// Runs the write path once for the value read at construction.
    ///
    /// That value is already in the URL, so the one-shot guard swallows it.
    pub fn mount(&mut self) -> Option<ParamWrite> {
        let initial = self.debounced.value().clone();
        self.commit(&initial)
    }

    /// Replaces the raw value. Returns the debounce timer to schedule, or
    /// `None` when the value did not change.
    pub fn set_value(&mut self, value: impl Into<String>) -> Option<DebounceTimer> {
        let value = value.into();
        if value == self.value {
            return None;
        }
        self.value = value.clone();
        self.debounced.push(value, self.delay)
    }

    /// Applies a fired debounce timer. Returns the new debounced value and
    /// the URL write it produces, if the value changed.
    pub fn on_timer(&mut self, generation: u64) -> Option<(String, Option<ParamWrite>)> {
        let settled = self.debounced.elapse(generation)?;
        let write = self.commit(&settled);
        Some((settled, write))
    }

    /// Re-reads the parameter after a back/forward navigation.
    ///
    /// The debounced value is reset together with the raw value, so no write
    /// follows. Returns the new value when it changed.
    pub fn on_navigation(&mut self, url: &Url) -> Option<String> {
        let value = read_param(url, &self.name);
        let changed = value != *self.debounced.value();
        self.value = value.clone();
        self.debounced.reset(value.clone());
        changed.then_some(value)
    }

    /// Drops the pending write timer. Returns true when one was pending.
    pub fn teardown(&mut self) -> bool {
        self.debounced.teardown()
    }

    fn commit(&mut self, value: &str) -> Option<ParamWrite> {
        if std::mem::take(&mut self.skip_first_write) {
            return None;
        }
        let value = (!value.trim().is_empty()).then(|| value.to_string());
        Some(ParamWrite {
            name: self.name.clone(),
            value,
        })
    }
}
