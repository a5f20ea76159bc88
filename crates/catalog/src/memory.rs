//! In-process map backend.
//!
//! Behaves like the REST service: addresses are normalized and looked up
//! in a table of known coordinates, maps get short content-derived ids and
//! a share URL under the configured frontend.

use std::cell::RefCell;
use std::collections::BTreeMap;

use foundation::math::LatLng;
use tracing::debug;

use crate::wire::{CreateMapRequest, CreateMapResponse, MapPin, MapRecord};
use crate::{CatalogError, MapService};

const MAP_ID_LEN: usize = 10;

/// Canonical form of an address used as a lookup key: full-width spaces and
/// digits become ASCII, dash variants become `-`, ends are trimmed.
pub fn normalize_address(address: &str) -> String {
    address
        .chars()
        .map(|c| match c {
            '\u{3000}' => ' ',
            '０'..='９' => char::from(b'0' + (c as u32 - '０' as u32) as u8),
            '−' | '–' | '—' => '-',
            c => c,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

#[derive(Debug, Clone)]
struct StoredMap {
    record: MapRecord,
    view_count: u64,
}

#[derive(Debug, Default)]
pub struct InMemoryMapService {
    frontend_url: String,
    known_addresses: BTreeMap<String, LatLng>,
    maps: RefCell<BTreeMap<String, StoredMap>>,
}

impl InMemoryMapService {
    pub fn new(frontend_url: impl Into<String>) -> Self {
        Self {
            frontend_url: frontend_url.into(),
            ..Self::default()
        }
    }

    /// Registers coordinates for an address (stored under its normalized
    /// form).
    pub fn with_address(mut self, address: &str, lat: f64, lng: f64) -> Self {
        self.known_addresses
            .insert(normalize_address(address), LatLng::new(lat, lng));
        self
    }

    /// Stores a record as-is, e.g. to seed a viewer.
    pub fn insert(&self, record: MapRecord) {
        self.maps.borrow_mut().insert(
            record.map_id.clone(),
            StoredMap {
                record,
                view_count: 0,
            },
        );
    }

    pub fn view_count(&self, map_id: &str) -> Option<u64> {
        self.maps.borrow().get(map_id).map(|m| m.view_count)
    }

    pub fn len(&self) -> usize {
        self.maps.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn resolve(&self, address: &str) -> Result<(String, LatLng), CatalogError> {
        let normalized = normalize_address(address);
        match self.known_addresses.get(&normalized) {
            Some(pos) => Ok((normalized, *pos)),
            None => Err(CatalogError::Validation(format!(
                "could not resolve address '{address}'"
            ))),
        }
    }

    fn fresh_id(&self, request: &CreateMapRequest) -> String {
        let maps = self.maps.borrow();
        let mut salt = maps.len() as u64;
        loop {
            let mut hasher = blake3::Hasher::new();
            hasher.update(request.title.as_bytes());
            for pin in &request.pins {
                hasher.update(pin.name.as_bytes());
                hasher.update(pin.address.as_bytes());
            }
            hasher.update(&salt.to_le_bytes());
            let id = hasher.finalize().to_hex()[..MAP_ID_LEN].to_string();
            if !maps.contains_key(&id) {
                return id;
            }
            salt += 1;
        }
    }
}

impl MapService for InMemoryMapService {
    async fn create_map(
        &self,
        request: &CreateMapRequest,
    ) -> Result<CreateMapResponse, CatalogError> {
        let pins = request
            .pins
            .iter()
            .map(|pin| {
                let (address, pos) = self.resolve(&pin.address)?;
                Ok(MapPin {
                    name: pin.name.clone(),
                    address,
                    lat: pos.lat,
                    lng: pos.lng,
                    note: pin.note.clone(),
                })
            })
            .collect::<Result<Vec<_>, CatalogError>>()?;

        let map_id = self.fresh_id(request);
        let share_url = format!("{}/m/{map_id}", self.frontend_url.trim_end_matches('/'));
        debug!(%map_id, pins = pins.len(), "map stored");
        self.insert(MapRecord {
            map_id: map_id.clone(),
            title: request.title.clone(),
            pins,
        });
        Ok(CreateMapResponse { map_id, share_url })
    }

    async fn fetch_map(&self, map_id: &str) -> Result<MapRecord, CatalogError> {
        let mut maps = self.maps.borrow_mut();
        let stored = maps.get_mut(map_id).ok_or(CatalogError::NotFound)?;
        stored.view_count += 1;
        Ok(stored.record.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::{InMemoryMapService, normalize_address};
    use crate::wire::{CreateMapRequest, PinInput};
    use crate::{CatalogError, MapService};
    use pollster::block_on;
    use pretty_assertions::assert_eq;

    fn service() -> InMemoryMapService {
        InMemoryMapService::new("http://localhost:5173/")
            .with_address("1-1 Marunouchi, Tokyo", 35.681, 139.767)
            .with_address("2-2 Shibuya, Tokyo", 35.658, 139.701)
    }

    fn request(addresses: &[&str]) -> CreateMapRequest {
        CreateMapRequest {
            title: "Viewing list".into(),
            pins: addresses
                .iter()
                .enumerate()
                .map(|(i, a)| PinInput {
                    name: format!("pin {i}"),
                    address: a.to_string(),
                    note: String::new(),
                })
                .collect(),
        }
    }

    #[test]
    fn normalizes_width_and_dashes() {
        assert_eq!(normalize_address("\u{3000}１−１ Marunouchi "), "1-1 Marunouchi");
        assert_eq!(normalize_address("2–3—4"), "2-3-4");
    }

    #[test]
    fn create_then_fetch() {
        let svc = service();
        let created = block_on(svc.create_map(&request(&[
            "1-1 Marunouchi, Tokyo",
            "２−２ Shibuya, Tokyo",
        ])))
        .expect("created");

        assert_eq!(created.map_id.len(), 10);
        assert_eq!(
            created.share_url,
            format!("http://localhost:5173/m/{}", created.map_id)
        );

        let record = block_on(svc.fetch_map(&created.map_id)).expect("fetched");
        assert_eq!(record.title, "Viewing list");
        assert_eq!(record.pins[1].address, "2-2 Shibuya, Tokyo");
        assert_eq!(record.pins[1].lat, 35.658);
        assert_eq!(svc.view_count(&created.map_id), Some(1));
    }

    #[test]
    fn identical_requests_get_distinct_ids() {
        let svc = service();
        let req = request(&["1-1 Marunouchi, Tokyo"]);
        let a = block_on(svc.create_map(&req)).expect("a");
        let b = block_on(svc.create_map(&req)).expect("b");
        assert_ne!(a.map_id, b.map_id);
        assert_eq!(svc.len(), 2);
    }

    #[test]
    fn unknown_address_rejects_the_whole_map() {
        let svc = service();
        let err = block_on(svc.create_map(&request(&["1-1 Marunouchi, Tokyo", "9-9 Nowhere"])))
            .unwrap_err();
        assert_eq!(
            err,
            CatalogError::Validation("could not resolve address '9-9 Nowhere'".to_string())
        );
        assert!(svc.is_empty());
    }

    #[test]
    fn unknown_id_is_not_found() {
        assert_eq!(
            block_on(service().fetch_map("missing")).unwrap_err(),
            CatalogError::NotFound
        );
    }
}
