//! The registry of CAN data ids.
//!
//! Every frame on the ground bus carries one signed byte identifying the
//! semantic meaning of its value field. Ids are assigned in bands:
//!
//! 0 - 6        raw sensors (pressure, accelerometer, gyroscope)
//! 7 - 11       GPS fix fields
//! 12 - 13      derived calibration values
//! 16 - 19      ascent/abort state
//! 38, 40 - 49  Kalman filter state
//! 80           command channel
//! 85 - 95      propulsion telemetry
//! 100 - 106    TVC actuator commands and heartbeat
//!
//! The registry is append-only; ids are never renumbered. The frame codec
//! itself does not consult it — unknown ids round-trip untouched, and
//! interpreting them is the receiver's concern.

use serde::{
    Deserialize,
    Serialize,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i8)]
pub enum DataId {
    Pressure      = 0,
    AccelerationX = 1,
    AccelerationY = 2,
    AccelerationZ = 3,
    GyroX         = 4,
    GyroY         = 5,
    GyroZ         = 6,

    GpsHdop       = 7,
    GpsLatitude   = 8,
    GpsLongitude  = 9,
    GpsAltitude   = 10,
    GpsSatellites = 11,

    Temperature   = 12,
    CalibPressure = 13,

    AbState       = 16,
    AbInclination = 17,
    AbAirspeed    = 18,
    AbAltitude    = 19,

    KalmanState   = 38,
    KalmanX       = 40,
    KalmanY       = 41,
    KalmanZ       = 42,
    KalmanVx      = 43,
    KalmanVy      = 44,
    KalmanVz      = 45,
    KalmanYaw     = 46,
    KalmanPitch   = 47,
    KalmanRoll    = 48,
    Altitude      = 49,

    Command       = 80,

    Pressure1     = 85,
    Pressure2     = 86,
    Temperature1  = 87,
    Temperature2  = 88,
    Temperature3  = 89,
    Status        = 90,
    MotorPosition = 91,
    VanePosition1 = 92,
    VanePosition2 = 93,
    VanePosition3 = 94,
    VanePosition4 = 95,

    TvcCommand    = 100,
    ThrustCommand = 101,
    VaneCommand1  = 102,
    VaneCommand2  = 103,
    VaneCommand3  = 104,
    VaneCommand4  = 105,
    TvcHeartbeat  = 106,
}

/// Looks a raw id byte up in the registry. `None` is not an error: it marks
/// an id this build does not know how to interpret.
#[inline]
pub fn resolve(raw: i8) -> Option<DataId> {
    DataId::try_from(raw).ok()
}

impl From<DataId> for i8 {
    #[inline]
    fn from(id: DataId) -> Self {
        id as i8
    }
}

impl TryFrom<i8> for DataId {
    type Error = i8;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        let id = match value {
            0 => Self::Pressure,
            1 => Self::AccelerationX,
            2 => Self::AccelerationY,
            3 => Self::AccelerationZ,
            4 => Self::GyroX,
            5 => Self::GyroY,
            6 => Self::GyroZ,

            7 => Self::GpsHdop,
            8 => Self::GpsLatitude,
            9 => Self::GpsLongitude,
            10 => Self::GpsAltitude,
            11 => Self::GpsSatellites,

            12 => Self::Temperature,
            13 => Self::CalibPressure,

            16 => Self::AbState,
            17 => Self::AbInclination,
            18 => Self::AbAirspeed,
            19 => Self::AbAltitude,

            38 => Self::KalmanState,
            40 => Self::KalmanX,
            41 => Self::KalmanY,
            42 => Self::KalmanZ,
            43 => Self::KalmanVx,
            44 => Self::KalmanVy,
            45 => Self::KalmanVz,
            46 => Self::KalmanYaw,
            47 => Self::KalmanPitch,
            48 => Self::KalmanRoll,
            49 => Self::Altitude,

            80 => Self::Command,

            85 => Self::Pressure1,
            86 => Self::Pressure2,
            87 => Self::Temperature1,
            88 => Self::Temperature2,
            89 => Self::Temperature3,
            90 => Self::Status,
            91 => Self::MotorPosition,
            92 => Self::VanePosition1,
            93 => Self::VanePosition2,
            94 => Self::VanePosition3,
            95 => Self::VanePosition4,

            100 => Self::TvcCommand,
            101 => Self::ThrustCommand,
            102 => Self::VaneCommand1,
            103 => Self::VaneCommand2,
            104 => Self::VaneCommand3,
            105 => Self::VaneCommand4,
            106 => Self::TvcHeartbeat,

            unknown => return Err(unknown),
        };

        Ok(id)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn resolve_known_bands() {
        assert_eq!(resolve(0), Some(DataId::Pressure));
        assert_eq!(resolve(8), Some(DataId::GpsLatitude));
        assert_eq!(resolve(38), Some(DataId::KalmanState));
        assert_eq!(resolve(80), Some(DataId::Command));
        assert_eq!(resolve(100), Some(DataId::TvcCommand));
        assert_eq!(resolve(106), Some(DataId::TvcHeartbeat));
    }

    #[test]
    fn unknown_ids_resolve_to_none() {
        for raw in [-128i8, -1, 14, 15, 20, 37, 39, 50, 79, 81, 96, 107, 127] {
            assert_eq!(resolve(raw), None, "id {raw} should be unassigned");
        }
    }

    #[test]
    fn raw_conversion_round_trips() {
        for raw in i8::MIN..=i8::MAX {
            if let Some(id) = resolve(raw) {
                assert_eq!(i8::from(id), raw);
            }
        }
    }
}
