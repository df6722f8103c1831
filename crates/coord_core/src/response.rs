use std::collections::BTreeMap;

use coord_logging::coord_debug;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Message used when a failure body carries no usable message.
pub const CONVERSION_FAILED: &str = "Conversion failed";

/// A map-service deep link: either a bare URL or a labelled one.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LinkValue {
    Url(String),
    Labeled {
        #[serde(default)]
        display: Option<String>,
        url: String,
    },
}

impl LinkValue {
    pub fn url(&self) -> &str {
        match self {
            LinkValue::Url(url) => url,
            LinkValue::Labeled { url, .. } => url,
        }
    }

    /// Text to show for the link: the label when present, else the URL.
    pub fn display(&self) -> &str {
        match self {
            LinkValue::Url(url) => url,
            LinkValue::Labeled { display, url } => display.as_deref().unwrap_or(url),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConvertSuccess {
    pub lat: f64,
    pub lng: f64,
    /// MGRS, Maidenhead, UTM, ...
    pub codes: BTreeMap<String, String>,
    /// "Google Maps", "Mapy.cz", ...
    pub links: BTreeMap<String, LinkValue>,
}

/// Failure body, by the message it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertFailure {
    /// `{ "error": { "message": ..., "code": ... } }`
    Detailed { message: String, code: Option<String> },
    /// `{ "message": ... }`
    Message(String),
    Unexplained,
}

impl ConvertFailure {
    pub fn message(&self) -> &str {
        match self {
            ConvertFailure::Detailed { message, .. } => message,
            ConvertFailure::Message(message) => message,
            ConvertFailure::Unexplained => CONVERSION_FAILED,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConversionResponse {
    Success(ConvertSuccess),
    Failure(ConvertFailure),
}

impl ConversionResponse {
    /// Classifies a response body by shape alone.
    ///
    /// Success requires an object with numeric `lat` and `lng` and
    /// object-valued `codes` and `links`. Anything else is a failure whose
    /// message is looked up in `error.message`, then `message`.
    pub fn classify(body: &Value) -> Self {
        match body.as_object() {
            Some(fields) => match success_from(fields) {
                Some(success) => ConversionResponse::Success(success),
                None => ConversionResponse::Failure(failure_from(fields)),
            },
            None => ConversionResponse::Failure(ConvertFailure::Unexplained),
        }
    }
}

fn success_from(fields: &Map<String, Value>) -> Option<ConvertSuccess> {
    let lat = fields.get("lat")?.as_f64()?;
    let lng = fields.get("lng")?.as_f64()?;
    let codes = fields.get("codes")?.as_object()?;
    let links = fields.get("links")?.as_object()?;

    let codes = codes
        .iter()
        .map(|(name, value)| {
            let text = match value {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            };
            (name.clone(), text)
        })
        .collect();

    let links = links
        .iter()
        .filter_map(|(name, value)| match LinkValue::deserialize(value) {
            Ok(link) => Some((name.clone(), link)),
            Err(err) => {
                coord_debug!("Skipping malformed link {:?}: {}", name, err);
                None
            }
        })
        .collect();

    Some(ConvertSuccess {
        lat,
        lng,
        codes,
        links,
    })
}

fn failure_from(fields: &Map<String, Value>) -> ConvertFailure {
    let non_empty = |value: Option<&Value>| {
        value
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
            .map(ToOwned::to_owned)
    };

    let nested = fields.get("error").and_then(Value::as_object);
    if let Some(message) = non_empty(nested.and_then(|error| error.get("message"))) {
        let code = nested
            .and_then(|error| error.get("code"))
            .and_then(Value::as_str)
            .map(ToOwned::to_owned);
        return ConvertFailure::Detailed { message, code };
    }
    if let Some(message) = non_empty(fields.get("message")) {
        return ConvertFailure::Message(message);
    }
    ConvertFailure::Unexplained
}
