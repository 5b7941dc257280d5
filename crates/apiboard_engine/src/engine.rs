use std::sync::{mpsc, Arc};
use std::thread;

use apiboard_core::{Request, RequestTicket};
use board_logging::{board_debug, board_info};
use thiserror::Error;

use crate::{ApiClient, EngineEvent};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Receives engine completions. Called from runtime worker threads.
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
    Fetch {
        ticket: RequestTicket,
        request: Request,
    },
}

/// Executes requests on a background tokio runtime. Every submitted request
/// produces exactly one [`EngineEvent::FetchCompleted`]. Dropping the handle
/// stops the worker thread.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(client: ApiClient, sink: Arc<dyn EventSink>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;
        let client = Arc::new(client);

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let client = client.clone();
                let sink = sink.clone();
                runtime.spawn(async move {
                    handle_command(client.as_ref(), command, sink.as_ref()).await;
                });
            }
            board_info!("engine command channel closed; worker exiting");
        });

        Ok(Self { cmd_tx })
    }

    pub fn submit(&self, ticket: RequestTicket, request: Request) {
        board_debug!("submit {} seq={}", ticket.widget, ticket.seq);
        let _ = self.cmd_tx.send(EngineCommand::Fetch { ticket, request });
    }
}

async fn handle_command(client: &ApiClient, command: EngineCommand, sink: &dyn EventSink) {
    match command {
        EngineCommand::Fetch { ticket, request } => {
            let result = client.execute(&request).await;
            sink.emit(EngineEvent::FetchCompleted { ticket, result });
        }
    }
}
