use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::wire::{CreateMapRequest, CreateMapResponse, ErrorBody, MapRecord};
use crate::{CatalogError, MapService};

const CREATE_FAILED: &str = "failed to create map";
const FETCH_FAILED: &str = "failed to load map";

/// Client for the `/api/maps` REST backend.
#[derive(Debug, Clone)]
pub struct HttpMapService {
    client: Client,
    base_url: String,
}

impl HttpMapService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn maps_url(&self) -> String {
        format!("{}/api/maps", self.base_url.trim_end_matches('/'))
    }
}

impl MapService for HttpMapService {
    async fn create_map(
        &self,
        request: &CreateMapRequest,
    ) -> Result<CreateMapResponse, CatalogError> {
        let url = self.maps_url();
        debug!(%url, pins = request.pins.len(), "creating map");
        let resp = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;
        read_json(resp, CREATE_FAILED).await
    }

    async fn fetch_map(&self, map_id: &str) -> Result<MapRecord, CatalogError> {
        let map_id = map_id.trim();
        if map_id.is_empty() {
            return Err(CatalogError::NotFound);
        }
        let url = format!("{}/{map_id}", self.maps_url());
        debug!(%url, "fetching map");
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;
        read_json(resp, FETCH_FAILED).await
    }
}

async fn read_json<T: DeserializeOwned>(
    resp: reqwest::Response,
    fallback: &str,
) -> Result<T, CatalogError> {
    let status = resp.status().as_u16();
    let body = resp
        .text()
        .await
        .map_err(|e| CatalogError::Network(e.to_string()))?;
    decode_response(status, &body, fallback)
}

/// Turns a status and body into the decoded payload. A 2xx body that does
/// not parse is `Corrupt`; anything else goes through [`error_from_status`].
pub fn decode_response<T: DeserializeOwned>(
    status: u16,
    body: &str,
    fallback: &str,
) -> Result<T, CatalogError> {
    if !(200..300).contains(&status) {
        let err = error_from_status(status, body, fallback);
        warn!(status, error = %err, "map service request failed");
        return Err(err);
    }
    serde_json::from_str(body).map_err(|e| CatalogError::Corrupt(e.to_string()))
}

/// Maps a non-2xx response to an error, passing the backend's `detail`
/// through verbatim when it sent one.
pub fn error_from_status(status: u16, body: &str, fallback: &str) -> CatalogError {
    if status == 404 {
        return CatalogError::NotFound;
    }
    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail)
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string());
    match status {
        400..=499 => CatalogError::Validation(detail),
        _ => CatalogError::Network(detail),
    }
}
