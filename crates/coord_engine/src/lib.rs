//! Coordinate lookup engine: conversion client and the runtime that executes
//! requests and debounce timers.
mod client;
mod engine;
mod types;

pub use client::{
    ClientSettings, ConvertClient, ReqwestConvertClient, ACCEPT_VALUE, DEFAULT_CONVERT_PATH,
};
pub use engine::{ChannelEventSink, EngineHandle, EventSink};
pub use types::{ConvertError, EngineError, EngineEvent, FailureKind, RequestId, TimerId};

/// Re-exported so callers can create the tokens the engine consumes.
pub use tokio_util::sync::CancellationToken;
