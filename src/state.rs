/// Frame counter shared by the background and sprite layers.
///
/// Each layer picks its frame as `counter mod len`, so layers with different
/// cycle lengths stay in range and phase independently.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub struct AnimationState {
    frame_index: u64,
}

impl AnimationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Frame to show for a layer of `len` frames. `len` must be non-zero.
    pub fn select(&self, len: usize) -> usize {
        (self.frame_index % len as u64) as usize
    }

    pub fn advance(self) -> Self {
        Self {
            frame_index: self.frame_index.wrapping_add(1),
        }
    }
}
