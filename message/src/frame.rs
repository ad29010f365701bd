//! The 8-byte CAN frame: a signed 32-bit value tagged with a data id and a
//! 24-bit timestamp.
//!
//! Layout: `[value: 4B BE][data_id: 1B][timestamp: 3B BE]`. The envelope is
//! deliberately minimal — no checksum, no length field — so it fits a single
//! CAN data frame; correctness rides entirely on the fixed field widths,
//! which is why decoding rejects any frame whose length deviates at all
//! rather than attempting a best-effort parse.

use serde::{
    Deserialize,
    Serialize,
};

use crate::DataId;

/// Exact size of an encoded frame. Anything else is not a frame.
pub const FRAME_LEN: usize = 8;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanFrame {
    pub value:     i32,
    pub data_id:   i8,
    pub timestamp: u32,
}

impl CanFrame {
    pub const TIMESTAMP_BITS: u32 = 24;
    pub const TIMESTAMP_MASK: u32 = (1 << Self::TIMESTAMP_BITS) - 1;

    /// Timestamps at or above 2^24 wrap silently; consumers own wrap-around.
    #[inline]
    pub fn new(data_id: i8, value: i32, timestamp: u32) -> Self {
        Self {
            value,
            data_id,
            timestamp: timestamp & Self::TIMESTAMP_MASK,
        }
    }

    pub fn pack(&self) -> [u8; FRAME_LEN] {
        let mut frame = [0u8; FRAME_LEN];

        frame[0..4].copy_from_slice(&self.value.to_be_bytes());
        frame[4] = self.data_id as u8;
        frame[5..8].copy_from_slice(&(self.timestamp & Self::TIMESTAMP_MASK).to_be_bytes()[1..]);

        frame
    }

    /// `None` is the normal result for anything that is not exactly one
    /// frame — a receive timeout, a runt, a long datagram. Never panics.
    pub fn unpack(data: &[u8]) -> Option<Self> {
        if data.len() != FRAME_LEN {
            tracing::debug!(len = data.len(), "discarding non-frame bus read");
            return None;
        }

        Some(Self {
            value:     i32::from_be_bytes([data[0], data[1], data[2], data[3]]),
            data_id:   data[4] as i8,
            timestamp: u32::from_be_bytes([0, data[5], data[6], data[7]]),
        })
    }

    /// The registry meaning of this frame's id, if assigned.
    #[inline]
    pub fn meaning(&self) -> Option<DataId> {
        crate::data_id::resolve(self.data_id)
    }
}
