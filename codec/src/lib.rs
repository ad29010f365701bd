pub use ::tokio_util::codec as tokio_codec;

pub mod link;

pub use link::{
    LinkCodec,
    LinkFrame,
};
