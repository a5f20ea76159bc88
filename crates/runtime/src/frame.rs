/// Redraw counter for one map view.
///
/// Advanced on every camera change, so journal entries can be ordered
/// against redraws without wall-clock time.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Frame {
    /// 0-based redraw index.
    pub index: u64,
}

impl Frame {
    pub fn new(index: u64) -> Self {
        Self { index }
    }

    pub fn next(self) -> Self {
        Self::new(self.index + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::Frame;

    #[test]
    fn default_starts_at_zero() {
        assert_eq!(Frame::default(), Frame::new(0));
    }

    #[test]
    fn next_advances_index() {
        let f = Frame::new(4).next();
        assert_eq!(f.index, 5);
    }
}
