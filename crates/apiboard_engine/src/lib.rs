//! Apiboard engine: HTTP bindings and background request execution.
mod client;
mod endpoints;
mod engine;
pub mod extract;
mod fetch;
mod types;

pub use client::{ApiClient, ClientConfig, TimestampFn};
pub use endpoints::Endpoints;
pub use engine::{ChannelEventSink, EngineError, EngineHandle, EventSink};
pub use fetch::{FetchSettings, HttpTransport, ReqwestTransport};
pub use types::{EngineEvent, FailureKind, FetchError};
