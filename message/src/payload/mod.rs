//! Payload records carried on the serial link under the payload opcode.
//!
//! Both records are fixed little-endian sequences of 32-bit words. The
//! original endpoints exchanged native-packed structs over a point-to-point
//! UART; both were little-endian machines, so the layout is pinned to that
//! byte order explicitly rather than left to the platform.

mod command;
mod sensor;

pub use command::CommandRecord;
pub use sensor::SensorRecord;

#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("payload length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

pub(crate) fn read_words<const N: usize>(data: &[u8]) -> [i32; N] {
    let mut words = [0i32; N];

    for (word, chunk) in words.iter_mut().zip(data.chunks_exact(4)) {
        *word = i32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }

    words
}

pub(crate) fn write_words<const N: usize>(words: &[i32]) -> [u8; N] {
    let mut buf = [0u8; N];

    for (chunk, word) in buf.chunks_exact_mut(4).zip(words) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }

    buf
}
