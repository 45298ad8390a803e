/// Render tick metadata.
///
/// A frame is produced every time the layer list and view state are handed
/// to the renderer. The index is the only timebase the core needs.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    /// 0-based frame index.
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
    fn next_advances_index() {
        let f0 = Frame::default();
        assert_eq!(f0.index, 0);
        assert_eq!(f0.next().next(), Frame::new(2));
    }
}
