use catalog::CatalogError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// Nothing to show, or the backend rejected the input.
    Validation(String),
    Network(String),
    NotFound,
    /// The mapping SDK could not be loaded.
    Render(String),
}

impl std::fmt::Display for MapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapError::Validation(msg) => write!(f, "{msg}"),
            MapError::Network(msg) => write!(f, "network error: {msg}"),
            MapError::NotFound => write!(f, "map not found"),
            MapError::Render(msg) => write!(f, "map could not be displayed: {msg}"),
        }
    }
}

impl std::error::Error for MapError {}

impl From<CatalogError> for MapError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation(msg) => MapError::Validation(msg),
            CatalogError::NotFound => MapError::NotFound,
            CatalogError::Network(msg) => MapError::Network(msg),
            CatalogError::Corrupt(msg) => MapError::Network(format!("invalid response: {msg}")),
        }
    }
}
