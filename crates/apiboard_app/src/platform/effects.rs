use std::sync::{mpsc, Arc};

use apiboard_core::{Effect, FetchFailure, Msg};
use apiboard_engine::{
    ApiClient, ClientConfig, EngineEvent, EngineHandle, EventSink, FailureKind, FetchError,
};
use board_logging::board_info;

use super::app::Input;

/// Turns core effects into engine submissions and engine completions back
/// into core messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(config: ClientConfig, input_tx: mpsc::Sender<Input>) -> anyhow::Result<Self> {
        let client = ApiClient::new(config)?;
        let engine = EngineHandle::new(client, Arc::new(MsgSink { input_tx }))?;
        Ok(Self { engine })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Fetch { ticket, request } => {
                    board_info!(
                        "Fetch widget={} seq={} request={:?}",
                        ticket.widget,
                        ticket.seq,
                        request
                    );
                    self.engine.submit(ticket, request);
                }
            }
        }
    }
}

struct MsgSink {
    input_tx: mpsc::Sender<Input>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let msg = match event {
            EngineEvent::FetchCompleted { ticket, result } => Msg::FetchCompleted {
                ticket,
                result: result.map_err(map_failure),
            },
        };
        let _ = self.input_tx.send(Input::Msg(msg));
    }
}

/// Classifies a transport-level error into the widget-facing taxonomy.
pub(crate) fn map_failure(err: FetchError) -> FetchFailure {
    match err.kind {
        FailureKind::HttpStatus(429) | FailureKind::Upstream { code: Some(429) } => {
            FetchFailure::RateLimited
        }
        FailureKind::HttpStatus(code) => FetchFailure::HttpStatus(code),
        FailureKind::Timeout => FetchFailure::Network(format!("timed out: {}", err.message)),
        FailureKind::Network => FetchFailure::Network(err.message),
        FailureKind::Upstream { .. } => FetchFailure::Upstream(err.message),
        FailureKind::InvalidUrl | FailureKind::TooLarge { .. } | FailureKind::Decode => {
            FetchFailure::Unknown(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error(kind: FailureKind, message: &str) -> FetchError {
        FetchError {
            kind,
            message: message.to_string(),
        }
    }

    #[test]
    fn too_many_requests_is_rate_limit_either_way() {
        assert_eq!(
            map_failure(error(FailureKind::HttpStatus(429), "429 Too Many Requests")),
            FetchFailure::RateLimited
        );
        assert_eq!(
            map_failure(error(FailureKind::Upstream { code: Some(429) }, "Too Many Requests")),
            FetchFailure::RateLimited
        );
    }

    #[test]
    fn other_kinds_keep_their_detail() {
        assert_eq!(
            map_failure(error(FailureKind::HttpStatus(404), "404 Not Found")),
            FetchFailure::HttpStatus(404)
        );
        assert_eq!(
            map_failure(error(FailureKind::Upstream { code: Some(400) }, "bad text")),
            FetchFailure::Upstream("bad text".into())
        );
        assert_eq!(
            map_failure(error(FailureKind::Network, "connection refused")),
            FetchFailure::Network("connection refused".into())
        );
        assert_eq!(
            map_failure(error(FailureKind::Decode, "malformed body")),
            FetchFailure::Unknown("unexpected response body: malformed body".into())
        );
    }
}
