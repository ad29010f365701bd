//! The master side of the serial protocol: one outstanding request at a
//! time, each answered (or not) within a caller-supplied deadline.
//!
//! There is deliberately no retry here — the link either answers in time or
//! the caller hears about it.

use std::time::Duration;

use bytes::Bytes;
use futures::{
    SinkExt,
    StreamExt,
};
use packed_struct::PrimitiveEnum;
use tokio::io::{
    AsyncRead,
    AsyncWrite,
};

use codec::{
    link,
    tokio_codec::Framed,
    LinkCodec,
    LinkFrame,
};
use message::{
    opcode::{
        PAYLOAD_REJECTED,
        PING_ACK,
    },
    CodecError,
    CommandRecord,
    SensorRecord,
    SlaveOpcode,
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("link closed by peer")]
    LinkClosed,

    #[error("timed out awaiting reply")]
    Timeout,

    #[error("slave rejected the payload record")]
    Rejected,

    #[error("unexpected reply: opcode {opcode:#04x}, {len} bytes")]
    UnexpectedReply { opcode: u8, len: usize },

    #[error(transparent)]
    Link(#[from] link::Error),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

pub struct Commander<IO> {
    framed: Framed<IO, LinkCodec>,
}

impl<IO> Commander<IO>
where
    IO: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(io: IO) -> Self {
        Self {
            framed: Framed::new(io, LinkCodec),
        }
    }

    /// Checks the slave is alive: sends ping, expects the fixed
    /// acknowledgement.
    #[tracing::instrument(skip(self), err(Display))]
    pub async fn ping(&mut self, timeout: Duration) -> Result<(), Error> {
        let reply = self.request(SlaveOpcode::Ping, Bytes::new(), timeout).await?;

        if reply.opcode == SlaveOpcode::Ping.to_primitive() && reply.payload[..] == PING_ACK {
            return Ok(());
        }

        Err(Error::UnexpectedReply {
            opcode: reply.opcode,
            len:    reply.payload.len(),
        })
    }

    /// One telemetry/command transaction: ships a sensor record, returns
    /// the slave's actuator command.
    #[tracing::instrument(skip_all, err(Display))]
    pub async fn exchange(
        &mut self,
        sensor: &SensorRecord,
        timeout: Duration,
    ) -> Result<CommandRecord, Error> {
        let payload = Bytes::copy_from_slice(&sensor.pack());
        let reply = self.request(SlaveOpcode::Payload, payload, timeout).await?;

        if reply.opcode != SlaveOpcode::Payload.to_primitive() {
            return Err(Error::UnexpectedReply {
                opcode: reply.opcode,
                len:    reply.payload.len(),
            });
        }

        if reply.payload[..] == PAYLOAD_REJECTED {
            return Err(Error::Rejected);
        }

        Ok(CommandRecord::unpack(&reply.payload)?)
    }

    /// Tells the slave to halt its host. Fire-and-forget: the peer powers
    /// down instead of answering, so the link is spent afterwards.
    #[tracing::instrument(skip(self), err(Display))]
    pub async fn shutdown(mut self) -> Result<(), Error> {
        self.framed
            .send(LinkFrame::new(SlaveOpcode::Shutdown.to_primitive(), Bytes::new()))
            .await?;

        Ok(())
    }

    async fn request(
        &mut self,
        opcode: SlaveOpcode,
        payload: Bytes,
        timeout: Duration,
    ) -> Result<LinkFrame, Error> {
        self.framed.send(LinkFrame::new(opcode.to_primitive(), payload)).await?;

        let reply = tokio::time::timeout(timeout, self.framed.next())
            .await
            .map_err(|_elapsed| Error::Timeout)?
            .ok_or(Error::LinkClosed)??;

        Ok(reply)
    }
}
