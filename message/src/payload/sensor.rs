//! The telemetry record the flight computer reports to the GNC slave: one
//! inertial/barometric snapshot plus actuator feedback, 52 bytes.

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
pub struct SensorRecord {
    pub timestamp:   u32,
    pub acc:         [i32; 3],
    pub gyro:        [i32; 3],
    pub baro:        i32,
    pub cc_pressure: i32,
    pub dynamixel:   [i32; 4],
}

impl SensorRecord {
    pub const SIZE: usize = 52;

    /// Total function: every record has exactly one 52-byte encoding.
    pub fn pack(&self) -> [u8; Self::SIZE] {
        let words = [
            self.timestamp as i32,
            self.acc[0],
            self.acc[1],
            self.acc[2],
            self.gyro[0],
            self.gyro[1],
            self.gyro[2],
            self.baro,
            self.cc_pressure,
            self.dynamixel[0],
            self.dynamixel[1],
            self.dynamixel[2],
            self.dynamixel[3],
        ];

        write_words(&words)
    }

    /// No per-field validation happens here; physical range checks are the
    /// caller's concern.
    pub fn unpack(data: &[u8]) -> Result<Self, CodecError> {
        if data.len() != Self::SIZE {
            return Err(CodecError::LengthMismatch {
                expected: Self::SIZE,
                actual:   data.len(),
            });
        }

        let words: [i32; 13] = read_words(data);

        Ok(Self {
            timestamp:   words[0] as u32,
            acc:         [words[1], words[2], words[3]],
            gyro:        [words[4], words[5], words[6]],
            baro:        words[7],
            cc_pressure: words[8],
            dynamixel:   [words[9], words[10], words[11], words[12]],
        })
    }
}

#[cfg(test)]
mod test {
    use byteorder::{
        LittleEndian,
        WriteBytesExt,
    };
    use proptest::prelude::*;

    use super::*;

    fn record_strategy() -> impl Strategy<Value = SensorRecord> {
        (
            any::<u32>(),
            any::<[i32; 3]>(),
            any::<[i32; 3]>(),
            any::<i32>(),
            any::<i32>(),
            any::<[i32; 4]>(),
        )
            .prop_map(|(timestamp, acc, gyro, baro, cc_pressure, dynamixel)| SensorRecord {
                timestamp,
                acc,
                gyro,
                baro,
                cc_pressure,
                dynamixel,
            })
    }

    proptest! {
        #[test]
        fn pack_unpack_equivalence(record in record_strategy()) {
            prop_assert_eq!(SensorRecord::unpack(&record.pack()), Ok(record));
        }

        #[test]
        fn unpack_pack_equivalence(data in proptest::collection::vec(any::<u8>(), 52)) {
            let record = SensorRecord::unpack(&data).unwrap();

            prop_assert_eq!(&record.pack()[..], &data[..]);
        }

        #[test]
        fn rejects_any_other_length(len in 0usize..128) {
            prop_assume!(len != SensorRecord::SIZE);

            let result = SensorRecord::unpack(&vec![0; len]);
            prop_assert_eq!(result, Err(CodecError::LengthMismatch { expected: 52, actual: len }));
        }
    }

    #[test]
    fn layout_is_fixed_little_endian() {
        let record = SensorRecord {
            timestamp:   0x0102_0304,
            acc:         [1, -2, 3],
            gyro:        [-4, 5, -6],
            baro:        98_400,
            cc_pressure: -7,
            dynamixel:   [2048, 2049, 2050, 2051],
        };

        let mut expected = vec![];
        expected.write_u32::<LittleEndian>(0x0102_0304).unwrap();
        for word in [1, -2, 3, -4, 5, -6, 98_400, -7, 2048, 2049, 2050, 2051] {
            expected.write_i32::<LittleEndian>(word).unwrap();
        }

        assert_eq!(&record.pack()[..], &expected[..]);
    }
}
