use std::{
    net::SocketAddr,
    time::Duration,
};

use net::{
    BusConfig,
    BusState,
};

#[derive(Debug, Clone, PartialEq, Eq, structopt::StructOpt)]
#[structopt(name = "boot", about = "boot the TVC flight computer and monitor bus telemetry")]
pub struct Options {
    /// Endpoint of the bus bridge frames are exchanged with.
    #[structopt(long = "bus")]
    pub bus: SocketAddr,

    /// Adapter channel, passed through to the bridge.
    #[structopt(long, default_value = "PCAN_USBBUS1")]
    pub channel: String,

    /// Bus bit rate, passed through to the bridge.
    #[structopt(long, default_value = "250000")]
    pub bitrate: u32,

    #[structopt(long, default_value = "active")]
    pub state: BusState,

    /// Per-poll receive deadline, in milliseconds.
    #[structopt(long = "recv-timeout", default_value = "10")]
    pub recv_timeout_ms: u64,
}

impl Options {
    pub fn bus_config(&self) -> BusConfig {
        BusConfig {
            address: self.bus,
            channel: self.channel.clone(),
            bitrate: self.bitrate,
            state:   self.state,
        }
    }

    pub fn recv_timeout(&self) -> Duration {
        Duration::from_millis(self.recv_timeout_ms)
    }
}
