use serde::{Deserialize, Serialize};

/// A pin as entered by the map author, before address resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PinInput {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateMapRequest {
    pub title: String,
    pub pins: Vec<PinInput>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateMapResponse {
    pub map_id: String,
    pub share_url: String,
}

/// A stored pin with its resolved coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapPin {
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapRecord {
    pub map_id: String,
    pub title: String,
    pub pins: Vec<MapPin>,
}

/// Body of a non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}
