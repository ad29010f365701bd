//! Stream framing for the serial link.
//!
//! Each message is one COBS-encoded, zero-delimited frame whose decoded
//! contents are `[opcode][payload…]`. COBS keeps the delimiter out of the
//! frame body, so receivers can always resynchronize on the next zero byte
//! no matter where they join the stream.

use bytes::{
    Buf,
    Bytes,
    BytesMut,
};
use tokio_util::codec::{
    Decoder,
    Encoder,
};

const DELIMITER: u8 = 0;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cobs framing corrupt")]
    Framing,

    #[error("link frame missing opcode byte")]
    MissingOpcode,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// One message on the link: an opcode byte and its raw payload. The codec
/// does not interpret either; opcode semantics live with the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LinkFrame {
    pub opcode:  u8,
    pub payload: Bytes,
}

impl LinkFrame {
    #[inline]
    pub fn new(opcode: u8, payload: impl Into<Bytes>) -> Self {
        Self {
            opcode,
            payload: payload.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Hash, PartialEq, Eq)]
pub struct LinkCodec;

impl Encoder<LinkFrame> for LinkCodec {
    type Error = Error;

    fn encode(&mut self, item: LinkFrame, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let mut raw = Vec::with_capacity(1 + item.payload.len());
        raw.push(item.opcode);
        raw.extend_from_slice(&item.payload);

        let old_len = dst.len();
        dst.resize(old_len + cobs::max_encoding_length(raw.len()), 0);

        let count = cobs::encode(&raw, &mut dst[old_len..]);
        dst.truncate(old_len + count);
        dst.extend_from_slice(&[DELIMITER]);

        Ok(())
    }
}

impl Decoder for LinkCodec {
    type Error = Error;
    type Item = LinkFrame;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        loop {
            let Some(end) = src.iter().position(|&b| b == DELIMITER) else {
                return Ok(None);
            };

            let mut frame = src.split_to(end);
            src.advance(1);

            // empty frame between delimiters: idle line noise, skip
            if frame.is_empty() {
                tracing::trace!("skipping idle delimiter");
                continue;
            }

            let len = cobs::decode_in_place(&mut frame).map_err(|()| Error::Framing)?;
            frame.truncate(len);

            if frame.is_empty() {
                return Err(Error::MissingOpcode);
            }

            let payload = frame.split_off(1).freeze();

            return Ok(Some(LinkFrame {
                opcode: frame[0],
                payload,
            }));
        }
    }
}

#[cfg(test)]
mod test {
    use futures::{
        SinkExt,
        StreamExt,
    };
    use proptest::prelude::*;
    use tokio_util::codec::{
        FramedRead,
        FramedWrite,
    };

    use super::*;

    fn encode_one(frame: LinkFrame) -> BytesMut {
        let mut buf = BytesMut::new();
        LinkCodec.encode(frame, &mut buf).unwrap();
        buf
    }

    #[test]
    fn round_trips_zero_heavy_payloads() {
        let frame = LinkFrame::new(0x02, vec![0x00, 0x00, 0xc5, 0x00]);

        let mut wire = encode_one(frame.clone());
        assert!(!wire[..wire.len() - 1].contains(&DELIMITER));

        let decoded = LinkCodec.decode(&mut wire).unwrap();
        assert_eq!(decoded, Some(frame));
        assert!(wire.is_empty());
    }

    #[test]
    fn decodes_back_to_back_frames() {
        let first = LinkFrame::new(0x00, vec![]);
        let second = LinkFrame::new(0x02, vec![1, 2, 3]);

        let mut wire = encode_one(first.clone());
        wire.extend_from_slice(&encode_one(second.clone()));

        assert_eq!(LinkCodec.decode(&mut wire).unwrap(), Some(first));
        assert_eq!(LinkCodec.decode(&mut wire).unwrap(), Some(second));
        assert_eq!(LinkCodec.decode(&mut wire).unwrap(), None);
    }

    #[test]
    fn waits_for_the_delimiter() {
        let wire = encode_one(LinkFrame::new(0x02, vec![4; 16]));

        let (head, tail) = wire.split_at(5);

        let mut partial = BytesMut::from(head);
        assert_eq!(LinkCodec.decode(&mut partial).unwrap(), None);

        partial.extend_from_slice(tail);
        assert!(LinkCodec.decode(&mut partial).unwrap().is_some());
    }

    #[test]
    fn skips_idle_delimiters() {
        let mut wire = BytesMut::from(&[DELIMITER, DELIMITER][..]);
        wire.extend_from_slice(&encode_one(LinkFrame::new(0x01, vec![])));

        let decoded = LinkCodec.decode(&mut wire).unwrap();
        assert_eq!(decoded, Some(LinkFrame::new(0x01, vec![])));
    }

    proptest! {
        #[test]
        fn pack_unpack_equivalence(
            opcode in any::<u8>(),
            payload in proptest::collection::vec(any::<u8>(), 0..256),
        ) {
            let frame = LinkFrame::new(opcode, payload);

            let mut wire = encode_one(frame.clone());
            prop_assert_eq!(LinkCodec.decode(&mut wire).unwrap(), Some(frame));
            prop_assert!(wire.is_empty());
        }
    }

    #[tokio::test]
    async fn framed_stream_round_trip() {
        let (client, server) = tokio::io::duplex(256);

        let mut write = FramedWrite::new(client, LinkCodec);
        let mut read = FramedRead::new(server, LinkCodec);

        let frame = LinkFrame::new(0x02, vec![0u8; 52]);
        write.send(frame.clone()).await.unwrap();

        assert_eq!(read.next().await.unwrap().unwrap(), frame);
    }
}
