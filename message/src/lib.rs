//! Wire types for the flight computer's two external links: the ground CAN
//! bus (8-byte tagged value frames) and the serial GNC link (opcode-dispatched
//! payload records).

pub mod data_id;
pub mod frame;
pub mod opcode;
pub mod payload;
pub mod tvc;

pub use data_id::DataId;
pub use frame::{
    CanFrame,
    FRAME_LEN,
};
pub use opcode::SlaveOpcode;
pub use payload::{
    CodecError,
    CommandRecord,
    SensorRecord,
};
pub use tvc::{
    TvcCommand,
    TvcState,
};
