//! Command and state codes for the thrust-vector-control subsystem.
//!
//! Commands ride the value field of frames tagged [`DataId::TvcCommand`];
//! the subsystem reports its state machine back under
//! [`DataId::TvcHeartbeat`].

use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    CanFrame,
    DataId,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum TvcCommand {
    Boot     = 1,
    Shutdown = 2,
    Abort    = 3,
}

impl TvcCommand {
    /// The frame carrying this command on the bus.
    #[inline]
    pub fn frame(self, timestamp: u32) -> CanFrame {
        CanFrame::new(DataId::TvcCommand.into(), self.into(), timestamp)
    }
}

impl From<TvcCommand> for i32 {
    #[inline]
    fn from(cmd: TvcCommand) -> Self {
        cmd as i32
    }
}

impl TryFrom<i32> for TvcCommand {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Boot),
            2 => Ok(Self::Shutdown),
            3 => Ok(Self::Abort),
            unknown => Err(unknown),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum TvcState {
    Idle     = 0,
    Boot     = 1,
    Compute  = 2,
    Shutdown = 3,
    Abort    = 4,
}

impl TryFrom<i32> for TvcState {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Idle),
            1 => Ok(Self::Boot),
            2 => Ok(Self::Compute),
            3 => Ok(Self::Shutdown),
            4 => Ok(Self::Abort),
            unknown => Err(unknown),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn command_frames_are_tagged() {
        let frame = TvcCommand::Abort.frame(7);

        assert_eq!(frame.data_id, i8::from(DataId::TvcCommand));
        assert_eq!(frame.value, 3);
        assert_eq!(frame.timestamp, 7);
    }

    #[test]
    fn state_codes_round_trip() {
        for state in [
            TvcState::Idle,
            TvcState::Boot,
            TvcState::Compute,
            TvcState::Shutdown,
            TvcState::Abort,
        ] {
            assert_eq!(TvcState::try_from(state as i32), Ok(state));
        }

        assert_eq!(TvcState::try_from(5), Err(5));
    }
}
