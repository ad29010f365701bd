//! The actuator command record the GNC slave returns for each sensor
//! record: thrust plus vane targets, 20 bytes.

use serde::{
    Deserialize,
    Serialize,
};

use crate::payload::{
    read_words,
    write_words,
    CodecError,
};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommandRecord {
    pub timestamp: i32,
    pub thrust:    i32,
    pub dynamixel: [i32; 3],
}

impl CommandRecord {
    pub const SIZE: usize = 20;

    /// The no-op command: all fields zero. Sent whenever no control law is
    /// installed to derive a real one.
    #[inline]
    pub fn neutral() -> Self {
        Self::default()
    }

    /// Total function: every record has exactly one 20-byte encoding.
    pub fn pack(&self) -> [u8; Self::SIZE] {
        let words = [
            self.timestamp,
            self.thrust,
            self.dynamixel[0],
            self.dynamixel[1],
            self.dynamixel[2],
        ];

        write_words(&words)
    }

    pub fn unpack(data: &[u8]) -> Result<Self, CodecError> {
        if data.len() != Self::SIZE {
            return Err(CodecError::LengthMismatch {
                expected: Self::SIZE,
                actual:   data.len(),
            });
        }

        let words: [i32; 5] = read_words(data);

        Ok(Self {
            timestamp: words[0],
            thrust:    words[1],
            dynamixel: [words[2], words[3], words[4]],
        })
    }
}
