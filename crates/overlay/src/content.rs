use scene::pin::{Group, GroupMember};
use serde::Serialize;
use url::form_urlencoded;

const MAPS_BASE_URL: &str = "https://www.google.com/maps";

/// Rendered popup body for one marker group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopupContent {
    /// Number of pins in the group, shown in the header.
    pub count: usize,
    pub minimized: bool,
    /// Caption of the detailed/minimized toggle control.
    pub toggle_label: &'static str,
    pub entries: Vec<PopupEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopupEntry {
    pub label: String,
    pub name: String,
    /// Absent in minimized form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<EntryDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryDetail {
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub links: EntryLinks,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryLinks {
    pub place_search: String,
    pub directions: String,
    pub street_view: String,
}

impl PopupContent {
    pub fn render(group: &Group, minimized: bool) -> Self {
        let entries = group
            .members()
            .iter()
            .map(|m| PopupEntry {
                label: m.index.label(),
                name: m.pin.name.clone(),
                detail: (!minimized).then(|| entry_detail(m)),
            })
            .collect();

        Self {
            count: group.len(),
            minimized,
            toggle_label: if minimized { "Details" } else { "Minimize" },
            entries,
        }
    }
}

fn entry_detail(member: &GroupMember) -> EntryDetail {
    let pin = &member.pin;
    let note = pin.note.trim();
    EntryDetail {
        address: pin.address.clone(),
        note: (!note.is_empty()).then(|| note.to_string()),
        links: EntryLinks::for_pin(&pin.address, pin.lat, pin.lng),
    }
}

impl EntryLinks {
    pub fn for_pin(address: &str, lat: f64, lng: f64) -> Self {
        let coords = format!("{lat},{lng}");
        Self {
            place_search: format!(
                "{MAPS_BASE_URL}/search/?{}",
                query(&[("api", "1"), ("query", address)])
            ),
            directions: format!(
                "{MAPS_BASE_URL}/dir/?{}",
                query(&[("api", "1"), ("destination", coords.as_str())])
            ),
            street_view: format!(
                "{MAPS_BASE_URL}/@?{}",
                query(&[
                    ("api", "1"),
                    ("map_action", "pano"),
                    ("viewpoint", coords.as_str()),
                    ("fov", "90"),
                ])
            ),
        }
    }
}

fn query(pairs: &[(&str, &str)]) -> String {
    let mut out = form_urlencoded::Serializer::new(String::new());
    for (k, v) in pairs {
        out.append_pair(k, v);
    }
    out.finish()
}
