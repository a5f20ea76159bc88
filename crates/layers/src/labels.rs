use scene::pin::Group;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelStyle {
    pub font_size_px: f32,
    pub color: &'static str,
    pub bold: bool,
}

impl LabelStyle {
    /// Style for a marker carrying one pin.
    pub fn single() -> Self {
        Self {
            font_size_px: 14.0,
            color: "#FFFFFF",
            bold: true,
        }
    }

    /// Smaller text so composite labels such as "A,B,C" fit the marker.
    pub fn composite() -> Self {
        Self {
            font_size_px: 12.0,
            ..Self::single()
        }
    }
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self::single()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerLabel {
    pub text: String,
    pub style: LabelStyle,
}

/// Comma-joined member letters in group order, e.g. "A,C".
///
/// Letters come from each pin's original input index, not its position in
/// the group.
pub fn composite_label_text(group: &Group) -> String {
    group
        .indices()
        .map(|i| i.label())
        .collect::<Vec<_>>()
        .join(",")
}

pub fn marker_label(group: &Group) -> MarkerLabel {
    let style = if group.len() > 1 {
        LabelStyle::composite()
    } else {
        LabelStyle::single()
    };
    MarkerLabel {
        text: composite_label_text(group),
        style,
    }
}

/// Hover title: member names joined with ", ".
pub fn marker_title(group: &Group) -> String {
    group
        .members()
        .iter()
        .map(|m| m.pin.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
