use serde::{Deserialize, Serialize};

/// Side of the anchor a popup is placed on.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Top,
    Bottom,
    Left,
    Right,
}

/// Directions handed out to popups opened while others are already open.
pub const ROTATION: [Direction; 4] = [
    Direction::Top,
    Direction::Bottom,
    Direction::Right,
    Direction::Left,
];

/// Direction for a popup opened while `already_open` popups are showing.
///
/// This is a cheap anti-overlap heuristic, not a collision solver: two
/// popups can still overlap when their anchors are close.
pub fn direction_for_open_count(already_open: usize) -> Direction {
    if already_open == 0 {
        return Direction::Top;
    }
    ROTATION[already_open % ROTATION.len()]
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Top => "top",
            Direction::Bottom => "bottom",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Direction, direction_for_open_count};

    #[test]
    fn rotation_cycles_through_four_sides() {
        let got: Vec<Direction> = (0..6).map(direction_for_open_count).collect();
        assert_eq!(
            got,
            vec![
                Direction::Top,
                Direction::Bottom,
                Direction::Right,
                Direction::Left,
                Direction::Top,
                Direction::Bottom,
            ]
        );
    }

    #[test]
    fn names_are_lowercase() {
        assert_eq!(Direction::Right.as_str(), "right");
    }
}
