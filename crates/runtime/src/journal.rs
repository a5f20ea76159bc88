use std::collections::VecDeque;

use crate::frame::Frame;

pub const DEFAULT_JOURNAL_CAPACITY: usize = 256;

/// One handled interaction of a map view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub frame_index: u64,
    /// Event kind, e.g. `"marker_clicked"` or `"map_loaded"`.
    pub kind: &'static str,
    pub message: String,
}

/// Bounded interaction history. Oldest entries are evicted first.
#[derive(Debug)]
pub struct Journal {
    entries: VecDeque<Entry>,
    capacity: usize,
    evicted: u64,
}

impl Default for Journal {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_JOURNAL_CAPACITY)
    }
}

impl Journal {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            evicted: 0,
        }
    }

    pub fn record(&mut self, frame: Frame, kind: &'static str, message: impl Into<String>) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
            self.evicted += 1;
        }
        self.entries.push_back(Entry {
            frame_index: frame.index,
            kind,
            message: message.into(),
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries lost to the capacity limit.
    pub fn evicted(&self) -> u64 {
        self.evicted
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> + '_ {
        self.entries.iter()
    }

    pub fn count(&self, kind: &str) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }

    pub fn last(&self, kind: &str) -> Option<&Entry> {
        self.entries.iter().rev().find(|e| e.kind == kind)
    }

    pub fn drain(&mut self) -> Vec<Entry> {
        self.entries.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::Journal;
    use crate::frame::Frame;

    #[test]
    fn keeps_frame_and_kind() {
        let mut j = Journal::default();
        j.record(Frame::new(2), "marker_clicked", "marker 0");
        let e = j.iter().next().expect("entry");
        assert_eq!((e.frame_index, e.kind), (2, "marker_clicked"));
    }

    #[test]
    fn evicts_oldest_past_capacity() {
        let mut j = Journal::with_capacity(2);
        j.record(Frame::new(0), "marker_clicked", "a");
        j.record(Frame::new(1), "toggle_clicked", "b");
        j.record(Frame::new(2), "close_clicked", "c");
        assert_eq!(j.len(), 2);
        assert_eq!(j.evicted(), 1);
        assert_eq!(j.count("marker_clicked"), 0);
        assert_eq!(j.last("close_clicked").map(|e| e.message.as_str()), Some("c"));
    }

    #[test]
    fn drain_empties() {
        let mut j = Journal::default();
        j.record(Frame::new(0), "pointer_up", "m");
        assert_eq!(j.drain().len(), 1);
        assert!(j.is_empty());
    }
}
