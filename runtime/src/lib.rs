//! Behavior on top of the wire types: the slave side of the serial
//! protocol, the master-side commander, and the ground-side bus routines.

pub mod commander;
pub mod ground;
pub mod slave;

pub use commander::Commander;
pub use slave::{
    ControlLaw,
    Dispatcher,
    NeutralLaw,
    Reply,
    ShutdownHandle,
};
