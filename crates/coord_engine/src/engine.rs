use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use coord_logging::{coord_debug, coord_trace};
use tokio::sync::mpsc as async_mpsc;
use tokio_util::sync::CancellationToken;

use crate::client::{ClientSettings, ConvertClient, ReqwestConvertClient};
use crate::{EngineError, EngineEvent, RequestId, TimerId};

/// Receives engine events on the engine thread.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

enum EngineCommand {
    Convert {
        request_id: RequestId,
        location: String,
        cancel: CancellationToken,
    },
    StartTimer {
        timer: TimerId,
        delay: Duration,
        cancel: CancellationToken,
    },
}

/// Runs conversions and debounce timers on a single-threaded tokio runtime
/// owned by a dedicated thread.
///
/// Every command carries a [`CancellationToken`]. A cancelled conversion
/// still reports `FailureKind::Cancelled`; a cancelled timer reports
/// nothing. Dropping the handle stops the thread and drops whatever is
/// still running.
pub struct EngineHandle {
    cmd_tx: Option<async_mpsc::UnboundedSender<EngineCommand>>,
    worker: Option<thread::JoinHandle<()>>,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings, sink: Arc<dyn EventSink>) -> Result<Self, EngineError> {
        let client: Arc<dyn ConvertClient> = Arc::new(ReqwestConvertClient::new(settings)?);
        Self::with_client(client, sink)
    }

    pub fn with_client(
        client: Arc<dyn ConvertClient>,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let (cmd_tx, mut cmd_rx) = async_mpsc::unbounded_channel();

        let worker = thread::Builder::new()
            .name("coord-engine".to_string())
            .spawn(move || {
                runtime.block_on(async move {
                    while let Some(command) = cmd_rx.recv().await {
                        tokio::spawn(handle_command(client.clone(), command, sink.clone()));
                    }
                });
                coord_debug!("Engine thread stopped");
            })?;

        Ok(Self {
            cmd_tx: Some(cmd_tx),
            worker: Some(worker),
        })
    }

    pub fn convert(
        &self,
        request_id: RequestId,
        location: impl Into<String>,
        cancel: CancellationToken,
    ) {
        self.send(EngineCommand::Convert {
            request_id,
            location: location.into(),
            cancel,
        });
    }

    pub fn start_timer(&self, timer: TimerId, delay: Duration, cancel: CancellationToken) {
        self.send(EngineCommand::StartTimer {
            timer,
            delay,
            cancel,
        });
    }

    fn send(&self, command: EngineCommand) {
        if let Some(tx) = &self.cmd_tx {
            let _ = tx.send(command);
        }
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.cmd_tx.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

async fn handle_command(
    client: Arc<dyn ConvertClient>,
    command: EngineCommand,
    sink: Arc<dyn EventSink>,
) {
    match command {
        EngineCommand::Convert {
            request_id,
            location,
            cancel,
        } => {
            coord_debug!("Request {} started location={:?}", request_id, location);
            let result = client.convert(&location, &cancel).await;
            sink.emit(EngineEvent::ConversionCompleted { request_id, result });
        }
        EngineCommand::StartTimer {
            timer,
            delay,
            cancel,
        } => {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    coord_trace!("Timer {:?} cancelled", timer);
                }
                _ = tokio::time::sleep(delay) => {
                    sink.emit(EngineEvent::TimerElapsed(timer));
                }
            }
        }
    }
}
