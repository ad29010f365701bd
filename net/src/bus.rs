//! The seam between the codec layer and whatever physically carries frames.
//!
//! The core never talks to bus hardware. It holds an owned transport that
//! can move small datagrams — one datagram per frame — and everything else
//! (adapter setup, kernel drivers, a UDP bridge to a remote gateway) lives
//! behind these traits. The mpsc implementations let tests run the full
//! stack in-process.

use std::io;

use tokio::{
    net::UdpSocket,
    sync::mpsc,
};

use crate::BusConfig;

#[async_trait::async_trait]
pub trait BusOps: Sized {
    async fn open(config: &BusConfig) -> io::Result<Self>;
}

#[async_trait::async_trait]
pub trait FrameSender {
    async fn send(&self, frame: &[u8]) -> io::Result<usize>;
}

#[async_trait::async_trait]
pub trait FrameReceiver {
    async fn recv(&self, buf: &mut [u8]) -> io::Result<usize>;
}

#[async_trait::async_trait]
impl BusOps for UdpSocket {
    #[tracing::instrument(err, fields(
        address = %config.address,
        channel = %config.channel,
        bitrate = config.bitrate,
        state = %config.state,
    ))]
    async fn open(config: &BusConfig) -> io::Result<Self> {
        let sock = UdpSocket::bind("0.0.0.0:0").await?;
        sock.connect(config.address).await?;

        Ok(sock)
    }
}

#[async_trait::async_trait]
impl FrameSender for UdpSocket {
    #[tracing::instrument(err, fields(frame.len = frame.len()), skip(self, frame))]
    #[inline]
    async fn send(&self, frame: &[u8]) -> io::Result<usize> {
        self.send(frame).await
    }
}

#[async_trait::async_trait]
impl FrameReceiver for UdpSocket {
    #[tracing::instrument(err, fields(buf.len = buf.len()), skip(self, buf))]
    #[inline]
    async fn recv(&self, buf: &mut [u8]) -> io::Result<usize> {
        self.recv(buf).await
    }
}

#[async_trait::async_trait]
impl FrameSender for mpsc::Sender<Vec<u8>> {
    async fn send(&self, frame: &[u8]) -> io::Result<usize> {
        self.send(frame.to_vec())
            .await
            .map_err(|e| io::Error::new(io::ErrorKind::ConnectionAborted, e))?;

        Ok(frame.len())
    }
}

#[async_trait::async_trait]
impl FrameReceiver for tokio::sync::Mutex<mpsc::Receiver<Vec<u8>>> {
    async fn recv(&self, buf: &mut [u8]) -> io::Result<usize> {
        let frame = {
            let mut rx = self.lock().await;
            rx.recv().await
        }
        .ok_or_else(|| {
            io::Error::new(io::ErrorKind::ConnectionAborted, "remote end of channel closed")
        })?;

        let n = frame.len().min(buf.len());
        buf[..n].copy_from_slice(&frame[..n]);

        Ok(frame.len())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn channel_pair_carries_frames() {
        let (tx, rx) = mpsc::channel(8);
        let rx = tokio::sync::Mutex::new(rx);

        FrameSender::send(&tx, &[1, 2, 3, 4, 5, 6, 7, 8]).await.unwrap();

        let mut buf = [0u8; 16];
        let n = FrameReceiver::recv(&rx, &mut buf).await.unwrap();

        assert_eq!(n, 8);
        assert_eq!(&buf[..n], &[1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[tokio::test]
    async fn closed_channel_surfaces_as_io_error() {
        let (tx, rx) = mpsc::channel::<Vec<u8>>(1);
        let rx = tokio::sync::Mutex::new(rx);
        drop(tx);

        let mut buf = [0u8; 8];
        let err = FrameReceiver::recv(&rx, &mut buf).await.unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::ConnectionAborted);
    }
}
