use std::time::Duration;

use coord_logging::{coord_debug, coord_warn};
use futures_util::StreamExt;
use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::Url;
use tokio_util::sync::CancellationToken;

use crate::{ConvertError, FailureKind};

pub const DEFAULT_CONVERT_PATH: &str = "/api/map";
pub const ACCEPT_VALUE: &str = "application/json, text/plain, */*";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Origin of the conversion service, e.g. `http://127.0.0.1:8080`.
    pub base_url: String,
    pub convert_path: String,
    /// Name of the query parameter carrying the location text.
    pub query_param: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            convert_path: DEFAULT_CONVERT_PATH.to_string(),
            query_param: "location".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_millis(15_000),
            max_bytes: 1024 * 1024,
        }
    }
}

#[async_trait::async_trait]
pub trait ConvertClient: Send + Sync {
    /// Resolves `location` and returns the parsed JSON body as-is.
    async fn convert(
        &self,
        location: &str,
        cancel: &CancellationToken,
    ) -> Result<serde_json::Value, ConvertError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestConvertClient {
    settings: ClientSettings,
    endpoint: Url,
    client: reqwest::Client,
}

impl ReqwestConvertClient {
    pub fn new(settings: ClientSettings) -> Result<Self, ConvertError> {
        let endpoint = Url::parse(&settings.base_url)
            .and_then(|base| base.join(&settings.convert_path))
            .map_err(|err| ConvertError::new(FailureKind::InvalidEndpoint, err.to_string()))?;

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ConvertError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            settings,
            endpoint,
            client,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn request(&self, location: &str) -> Result<serde_json::Value, ConvertError> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair(&self.settings.query_param, location);

        let response = self
            .client
            .get(url)
            .header(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE))
            .send()
            .await
            .map_err(|err| self.map_reqwest_error(err))?;

        let status = response.status();
        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(self.too_large());
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|err| self.map_reqwest_error(err))?;
            if bytes.len() as u64 + chunk.len() as u64 > self.settings.max_bytes {
                return Err(self.too_large());
            }
            bytes.extend_from_slice(&chunk);
        }

        // Status does not decide success; a JSON body is returned whatever it is.
        match serde_json::from_slice(&bytes) {
            Ok(body) => {
                coord_debug!("Conversion answered status={} bytes={}", status, bytes.len());
                Ok(body)
            }
            Err(err) if status.is_success() => Err(ConvertError::new(
                FailureKind::InvalidBody,
                format!("invalid response body: {err}"),
            )),
            Err(_) => Err(ConvertError::new(
                FailureKind::HttpStatus(status.as_u16()),
                format!("Request failed with status code {}", status.as_u16()),
            )),
        }
    }

    fn too_large(&self) -> ConvertError {
        let max_bytes = self.settings.max_bytes;
        ConvertError::new(
            FailureKind::TooLarge { max_bytes },
            format!("response larger than {max_bytes} bytes"),
        )
    }

    fn map_reqwest_error(&self, err: reqwest::Error) -> ConvertError {
        if err.is_timeout() {
            return ConvertError::new(
                FailureKind::Timeout,
                format!(
                    "timeout of {}ms exceeded",
                    self.settings.request_timeout.as_millis()
                ),
            );
        }
        ConvertError::new(FailureKind::Network, err.to_string())
    }
}

#[async_trait::async_trait]
impl ConvertClient for ReqwestConvertClient {
    async fn convert(
        &self,
        location: &str,
        cancel: &CancellationToken,
    ) -> Result<serde_json::Value, ConvertError> {
        // Dropping the losing request future aborts the transport.
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ConvertError::new(FailureKind::Cancelled, "canceled")),
            result = self.request(location) => result,
        };
        if let Err(err) = &result {
            if !err.is_cancelled() {
                coord_warn!("Conversion of {:?} failed: {} ({})", location, err, err.kind);
            }
        }
        result
    }
}
