use std::sync::Arc;

use apiboard_core::{Payload, Request};
use board_logging::{board_debug, board_warn};

use crate::extract::{self, TranslateBody};
use crate::fetch::{FetchSettings, HttpTransport, ReqwestTransport};
use crate::{Endpoints, FailureKind, FetchError};

/// Source of the advice cache-busting timestamp, in milliseconds.
pub type TimestampFn = Arc<dyn Fn() -> i64 + Send + Sync>;

#[derive(Clone)]
pub struct ClientConfig {
    pub settings: FetchSettings,
    pub endpoints: Endpoints,
    pub timestamp_millis: TimestampFn,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            settings: FetchSettings::default(),
            endpoints: Endpoints::default(),
            timestamp_millis: Arc::new(|| chrono::Utc::now().timestamp_millis()),
        }
    }
}

/// Binds each [`Request`] to its endpoint and payload extractor.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn HttpTransport>,
    endpoints: Endpoints,
    timestamp_millis: TimestampFn,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, FetchError> {
        let transport = ReqwestTransport::new(&config.settings)?;
        Ok(Self::with_transport(
            Arc::new(transport),
            config.endpoints,
            config.timestamp_millis,
        ))
    }

    pub fn with_transport(
        transport: Arc<dyn HttpTransport>,
        endpoints: Endpoints,
        timestamp_millis: TimestampFn,
    ) -> Self {
        Self {
            transport,
            endpoints,
            timestamp_millis,
        }
    }

    pub async fn execute(&self, request: &Request) -> Result<Payload, FetchError> {
        let result = self.dispatch(request).await;
        if let Err(err) = &result {
            board_warn!("{} request failed: {}", request.widget(), err);
        }
        result
    }

    async fn dispatch(&self, request: &Request) -> Result<Payload, FetchError> {
        match request {
            Request::Advice => {
                let url = self.endpoints.advice((self.timestamp_millis)())?;
                let body = self.transport.get(url).await?;
                Ok(Payload::Advice(extract::advice(&body)?))
            }
            Request::Categories => {
                let body = self.transport.get(self.endpoints.categories()?).await?;
                Ok(Payload::Categories(extract::categories(&body)?))
            }
            Request::CatImages { category } => {
                let url = self.endpoints.cat_images(*category)?;
                let body = self.transport.get(url).await?;
                let images = extract::cat_images(&body)?;
                board_debug!("cat search {:?} returned {} images", category, images.len());
                Ok(Payload::CatImages(images))
            }
            Request::Translate { style, text } => {
                let url = self.endpoints.translate(*style)?;
                let body = serde_json::to_vec(&TranslateBody { text: text.as_str() })
                    .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))?;
                let body = self.transport.post_json(url, body).await?;
                Ok(Payload::Translation(extract::translation(&body)?))
            }
            Request::LatestLaunch => {
                let body = self.transport.get(self.endpoints.latest_launch()?).await?;
                Ok(Payload::Launch(extract::launch(&body)?))
            }
        }
    }
}
