use std::fmt;

pub type RequestId = u64;

/// Identifies one scheduled timer: a slot chosen by the caller and the
/// generation it was scheduled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId {
    pub slot: u32,
    pub generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    ConversionCompleted {
        request_id: RequestId,
        result: Result<serde_json::Value, ConvertError>,
    },
    TimerElapsed(TimerId),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ConvertError {
    pub kind: FailureKind,
    pub message: String,
}

impl ConvertError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.kind == FailureKind::Cancelled
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidEndpoint,
    HttpStatus(u16),
    Timeout,
    InvalidBody,
    TooLarge { max_bytes: u64 },
    Cancelled,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::InvalidBody => write!(f, "invalid response body"),
            FailureKind::TooLarge { max_bytes } => {
                write!(f, "response too large (max {max_bytes})")
            }
            FailureKind::Cancelled => write!(f, "cancelled"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to build http client: {0}")]
    Client(#[from] ConvertError),
}
