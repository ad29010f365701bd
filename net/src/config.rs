use std::{
    net::SocketAddr,
    str::FromStr,
};

/// Bus parameters handed through to whatever sits behind the frame
/// transport. None of these are validated here: the adapter on the other
/// side of the bridge owns their meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusConfig {
    /// Bridge endpoint frames are exchanged with.
    pub address: SocketAddr,

    /// Adapter channel identifier, e.g. `can0` or `PCAN_USBBUS1`.
    pub channel: String,

    /// Bus bit rate in bits per second.
    pub bitrate: u32,

    pub state: BusState,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BusState {
    /// Transmit and receive.
    Active,

    /// Listen-only.
    Passive,
}

impl FromStr for BusState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "passive" => Ok(Self::Passive),
            other => Err(format!("unknown bus state: {other:?} (expected active or passive)")),
        }
    }
}

impl std::fmt::Display for BusState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Passive => write!(f, "passive"),
        }
    }
}
