//! Fixed-capacity exchange buffer.

use super::FRAME_CAPACITY;

/// One direction of one duplex exchange.
///
/// Frames are reused in place for every exchange; nothing here allocates.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Frame([u8; FRAME_CAPACITY]);

impl Frame {
    pub const fn zeroed() -> Self {
        Self([0; FRAME_CAPACITY])
    }

    /// Build a frame from raw bytes as clocked in.  Input longer than the
    /// capacity is cut; shorter input is zero-padded.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut frame = Self::zeroed();
        let n = bytes.len().min(FRAME_CAPACITY);
        frame.0[..n].copy_from_slice(&bytes[..n]);
        frame
    }

    pub fn clear(&mut self) {
        self.0.fill(0);
    }

    /// Replace the contents with `payload`, keeping at least one trailing
    /// NUL: at most `FRAME_CAPACITY - 1` bytes are copied.
    pub fn load(&mut self, payload: &[u8]) {
        self.clear();
        let n = payload.len().min(FRAME_CAPACITY - 1);
        self.0[..n].copy_from_slice(&payload[..n]);
    }

    /// The command token: bytes up to the first `\n` or NUL, bounded to
    /// `FRAME_CAPACITY - 1` bytes.
    pub fn token(&self) -> &[u8] {
        let bounded = &self.0[..FRAME_CAPACITY - 1];
        let end = bounded
            .iter()
            .position(|&b| b == b'\n' || b == 0)
            .unwrap_or(bounded.len());
        &bounded[..end]
    }

    /// Bytes before the first NUL (the meaningful part of an outbound frame).
    pub fn payload(&self) -> &[u8] {
        let end = self.0.iter().position(|&b| b == 0).unwrap_or(FRAME_CAPACITY);
        &self.0[..end]
    }

    pub fn as_bytes(&self) -> &[u8; FRAME_CAPACITY] {
        &self.0
    }

    pub fn as_mut_bytes(&mut self) -> &mut [u8; FRAME_CAPACITY] {
        &mut self.0
    }

    pub fn is_zeroed(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl core::fmt::Debug for Frame {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Frame(\"{}\")", self.payload().escape_ascii())
    }
}
