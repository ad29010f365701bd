//! The serial link's operation selector and its fixed reply sentinels.

use packed_struct::prelude::*;
use serde::{
    Deserialize,
    Serialize,
};

/// Two-byte acknowledgement returned for a [`SlaveOpcode::Ping`].
pub const PING_ACK: [u8; 2] = [0xce, 0xec];

/// Two-byte sentinel returned when a payload message has the wrong length.
pub const PAYLOAD_REJECTED: [u8; 2] = [0xc5, 0xe5];

/// Closed set of operations the slave understands. Any other opcode byte is
/// not dispatched at all.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PrimitiveEnum_u8, Serialize, Deserialize)]
#[repr(u8)]
pub enum SlaveOpcode {
    Ping     = 0x00,
    Shutdown = 0x01,
    Payload  = 0x02,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn opcode_bytes_are_fixed() {
        assert_eq!(SlaveOpcode::from_primitive(0x00), Some(SlaveOpcode::Ping));
        assert_eq!(SlaveOpcode::from_primitive(0x01), Some(SlaveOpcode::Shutdown));
        assert_eq!(SlaveOpcode::from_primitive(0x02), Some(SlaveOpcode::Payload));
    }

    #[test]
    fn unassigned_opcodes_do_not_parse() {
        for raw in 0x03..=0xffu8 {
            assert_eq!(SlaveOpcode::from_primitive(raw), None);
        }
    }
}
