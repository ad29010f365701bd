//! The slave side of the serial protocol: opcode dispatch and the serve
//! loop that keeps the link answered.

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
    CommandRecord,
    SensorRecord,
    SlaveOpcode,
};

/// Derives the actuator command answering a sensor record.
pub trait ControlLaw {
    fn command(&self, sensor: &SensorRecord) -> CommandRecord;
}

/// The stand-in law when no guidance computation is installed: every sensor
/// record is answered with the neutral (all-zero) command.
#[derive(Copy, Clone, Debug, Default)]
pub struct NeutralLaw;

impl ControlLaw for NeutralLaw {
    #[inline]
    fn command(&self, _sensor: &SensorRecord) -> CommandRecord {
        CommandRecord::neutral()
    }
}

/// Invoked on the shutdown opcode. The real implementation halts the host;
/// the dispatcher only guarantees it is called exactly once per shutdown
/// message.
pub trait ShutdownHandle {
    fn shutdown(&self);
}

impl<F> ShutdownHandle for F
where
    F: Fn(),
{
    #[inline]
    fn shutdown(&self) {
        self()
    }
}

/// Bytes to send back over the link, tagged with the opcode they answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub opcode:  SlaveOpcode,
    pub payload: Bytes,
}

pub struct Dispatcher<L, S> {
    law:      L,
    shutdown: S,
}

impl<L, S> Dispatcher<L, S>
where
    L: ControlLaw,
    S: ShutdownHandle,
{
    pub fn new(law: L, shutdown: S) -> Self {
        Self {
            law,
            shutdown,
        }
    }

    /// One protocol step. Never fails: a malformed payload degrades to the
    /// rejection sentinel so the link stays live, and the only reply-less
    /// paths are shutdown (terminal) and opcodes that want no answer.
    pub fn dispatch(&self, opcode: SlaveOpcode, payload: &[u8]) -> Option<Reply> {
        match opcode {
            SlaveOpcode::Ping => {
                tracing::debug!("ping");

                Some(Reply {
                    opcode:  SlaveOpcode::Ping,
                    payload: Bytes::from_static(&PING_ACK),
                })
            },

            SlaveOpcode::Shutdown => {
                tracing::warn!("shutdown requested over link");
                self.shutdown.shutdown();

                None
            },

            SlaveOpcode::Payload => match SensorRecord::unpack(payload) {
                Ok(sensor) => {
                    let command = self.law.command(&sensor);

                    Some(Reply {
                        opcode:  SlaveOpcode::Payload,
                        payload: Bytes::copy_from_slice(&command.pack()),
                    })
                },
                Err(e) => {
                    tracing::warn!(error = %e, "rejecting payload message");

                    Some(Reply {
                        opcode:  SlaveOpcode::Payload,
                        payload: Bytes::from_static(&PAYLOAD_REJECTED),
                    })
                },
            },
        }
    }
}

/// Serves the protocol over a serial stream until the peer hangs up or
/// sends shutdown. Frame-level corruption and unassigned opcodes are logged
/// and skipped; only transport failures propagate.
pub async fn serve<IO, L, S>(io: IO, dispatcher: Dispatcher<L, S>) -> Result<(), link::Error>
where
    IO: AsyncRead + AsyncWrite + Unpin,
    L: ControlLaw,
    S: ShutdownHandle,
{
    let mut framed = Framed::new(io, LinkCodec);

    while let Some(inbound) = framed.next().await {
        let frame = match inbound {
            Ok(frame) => frame,
            Err(link::Error::Io(e)) => return Err(e.into()),
            Err(e) => {
                tracing::warn!(error = %e, "bad frame on link, resynchronizing");
                continue;
            },
        };

        tracing::debug!(
            opcode = frame.opcode,
            payload = %hex::encode(&frame.payload),
            "link message",
        );

        let Some(opcode) = SlaveOpcode::from_primitive(frame.opcode) else {
            tracing::debug!(opcode = frame.opcode, "ignoring unassigned opcode");
            continue;
        };

        if let Some(reply) = dispatcher.dispatch(opcode, &frame.payload) {
            framed.send(LinkFrame::new(reply.opcode.to_primitive(), reply.payload)).await?;
        }

        if opcode == SlaveOpcode::Shutdown {
            break;
        }
    }

    Ok(())
}
