pub use bus::{
    BusOps,
    FrameReceiver,
    FrameSender,
};
pub use config::{
    BusConfig,
    BusState,
};

mod bus;
mod config;
