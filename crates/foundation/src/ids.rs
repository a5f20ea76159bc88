use serde::{Deserialize, Serialize};

/// Position of a pin in the original input sequence.
///
/// The index is the pin's identity for display: 0 → "A", 1 → "B", …,
/// 25 → "Z", 26 → "AA".
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PinIndex(pub usize);

impl PinIndex {
    pub fn label(self) -> String {
        let mut n = self.0 + 1;
        let mut letters = Vec::new();
        while n > 0 {
            n -= 1;
            letters.push(b'A' + (n % 26) as u8);
            n /= 26;
        }
        letters.iter().rev().map(|&b| b as char).collect()
    }

    /// Inverse of [`PinIndex::label`]; case-insensitive.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        if label.is_empty() {
            return None;
        }
        let mut n: usize = 0;
        for c in label.chars() {
            let c = c.to_ascii_uppercase();
            if !c.is_ascii_uppercase() {
                return None;
            }
            n = n.checked_mul(26)?.checked_add((c as u8 - b'A') as usize + 1)?;
        }
        Some(PinIndex(n - 1))
    }
}

/// Rendering-surface marker handle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MarkerId(pub u32);

/// Handle of one popup overlay element.
///
/// A reopened popup gets a fresh id, so stale pointer events aimed at a
/// closed popup never reach its replacement.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OverlayId(pub u64);
