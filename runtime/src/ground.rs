//! Ground-side bus routines: command the TVC subsystem awake and watch the
//! telemetry stream.

use std::{
    io,
    time::Duration,
};

use message::{
    CanFrame,
    DataId,
    TvcCommand,
    TvcState,
    FRAME_LEN,
};
use net::{
    FrameReceiver,
    FrameSender,
};

/// Default bus receive deadline.
pub const DEFAULT_RECV_TIMEOUT: Duration = Duration::from_millis(10);

/// Ratio between commanded thrust and expected combustion chamber pressure.
pub const THRUST_TO_PRESSURE: f64 = 76.233;

pub async fn send_frame<B: FrameSender>(bus: &B, frame: &CanFrame) -> io::Result<()> {
    bus.send(&frame.pack()).await?;

    Ok(())
}

pub async fn send_command<B: FrameSender>(
    bus: &B,
    command: TvcCommand,
    timestamp: u32,
) -> io::Result<()> {
    tracing::info!(?command, timestamp, "sending TVC command");

    send_frame(bus, &command.frame(timestamp)).await
}

/// Waits up to `timeout` for one frame. `None` covers both "nothing
/// arrived" and "something arrived that is not a frame" — the caller loops
/// either way. Transport failures propagate.
pub async fn recv_frame<B: FrameReceiver>(
    bus: &B,
    timeout: Duration,
) -> io::Result<Option<CanFrame>> {
    // oversized so a long datagram reads as invalid instead of truncating
    let mut buf = [0u8; 2 * FRAME_LEN];

    match tokio::time::timeout(timeout, bus.recv(&mut buf)).await {
        Err(_elapsed) => Ok(None),
        Ok(Ok(n)) => Ok(CanFrame::unpack(&buf[..n.min(buf.len())])),
        Ok(Err(e)) => Err(e),
    }
}

/// Boots the TVC flight computer over the bus.
pub async fn boot<B: FrameSender>(bus: &B) -> io::Result<()> {
    send_command(bus, TvcCommand::Boot, 0).await
}

/// Receives and logs telemetry until the transport fails. Runs forever
/// otherwise; frames are independent, so nothing here tracks state between
/// them.
pub async fn monitor<B: FrameReceiver>(bus: &B, timeout: Duration) -> io::Result<()> {
    loop {
        let Some(frame) = recv_frame(bus, timeout).await? else {
            continue;
        };

        log_frame(&frame);
    }
}

fn log_frame(frame: &CanFrame) {
    let CanFrame {
        value,
        timestamp,
        ..
    } = *frame;

    match frame.meaning() {
        Some(id @ DataId::TvcHeartbeat) => match TvcState::try_from(value) {
            Ok(state) => tracing::info!(?id, ?state, timestamp, "frame"),
            Err(raw) => tracing::warn!(?id, state = raw, timestamp, "heartbeat with unknown state"),
        },

        Some(id @ DataId::Pressure2) => {
            let thrust_estimate = value as f64 / THRUST_TO_PRESSURE;
            tracing::info!(?id, value, thrust_estimate, timestamp, "frame");
        },

        Some(id) => tracing::info!(?id, value, timestamp, "frame"),

        None => {
            tracing::info!(data_id = frame.data_id, value, timestamp, "frame with unassigned id")
        },
    }
}

#[cfg(test)]
mod test {
    use tokio::sync::{
        mpsc,
        Mutex,
    };

    use super::*;

    #[tokio::test]
    async fn recv_frame_times_out_to_none() {
        let (_tx, rx) = mpsc::channel::<Vec<u8>>(1);
        let rx = Mutex::new(rx);

        let got = recv_frame(&rx, Duration::from_millis(1)).await.unwrap();
        assert_eq!(got, None);
    }

    #[tokio::test]
    async fn recv_frame_decodes_valid_frames() {
        let (tx, rx) = mpsc::channel(1);
        let rx = Mutex::new(rx);

        let sent = CanFrame::new(DataId::Altitude.into(), 1500, 99);
        FrameSender::send(&tx, &sent.pack()).await.unwrap();

        let got = recv_frame(&rx, Duration::from_millis(50)).await.unwrap();
        assert_eq!(got, Some(sent));
    }

    #[tokio::test]
    async fn recv_frame_discards_runts() {
        let (tx, rx) = mpsc::channel(1);
        let rx = Mutex::new(rx);

        FrameSender::send(&tx, &[1, 2, 3]).await.unwrap();

        let got = recv_frame(&rx, Duration::from_millis(50)).await.unwrap();
        assert_eq!(got, None);
    }

    #[tokio::test]
    async fn boot_puts_the_command_frame_on_the_bus() {
        let (tx, mut rx) = mpsc::channel(1);

        boot(&tx).await.unwrap();

        let wire = rx.recv().await.unwrap();
        assert_eq!(wire, vec![0x00, 0x00, 0x00, 0x01, 0x64, 0x00, 0x00, 0x00]);
    }
}
