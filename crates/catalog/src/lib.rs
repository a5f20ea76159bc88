//! Map storage backend: wire types, request validation and the services
//! that create and fetch shared maps.

pub mod http;
pub mod memory;
pub mod validate;
pub mod wire;

pub use http::HttpMapService;
pub use memory::{InMemoryMapService, normalize_address};
pub use validate::prepare_request;
pub use wire::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The request was rejected before or by the backend.
    Validation(String),
    NotFound,
    Network(String),
    /// The backend answered with something that is not the expected JSON.
    Corrupt(String),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Validation(msg) => write!(f, "{msg}"),
            CatalogError::NotFound => write!(f, "map not found"),
            CatalogError::Network(msg) => write!(f, "map service unreachable: {msg}"),
            CatalogError::Corrupt(msg) => write!(f, "invalid response from map service: {msg}"),
        }
    }
}

impl std::error::Error for CatalogError {}

/// The two operations the map backend exposes.
#[allow(async_fn_in_trait)]
pub trait MapService {
    async fn create_map(
        &self,
        request: &CreateMapRequest,
    ) -> Result<CreateMapResponse, CatalogError>;
    async fn fetch_map(&self, map_id: &str) -> Result<MapRecord, CatalogError>;
}
