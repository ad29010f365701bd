use std::{
    io,
    io::Read,
};

use structopt::StructOpt;

use message::CanFrame;

#[derive(Debug, Clone, PartialEq, Eq, structopt::StructOpt)]
#[structopt(about = "decode a bus frame from stdin (default raw binary format)")]
pub struct Mode {
    #[structopt(
        long,
        help = "interpret stdin as hex (can be space and/or newline separated, does not strip 0x)"
    )]
    hex: bool,
}

fn main() -> eyre::Result<()> {
    let mode = Mode::from_args();

    let buf = match mode {
        Mode {
            hex: true,
        } => {
            let mut s = String::new();
            io::stdin().read_to_string(&mut s)?;

            hex::decode(s.trim().replace(&[' ', '\t', '\n', '\r'][..], ""))?
        },
        _ => {
            let mut buf = vec![];
            io::stdin().read_to_end(&mut buf)?;

            buf
        },
    };

    match CanFrame::unpack(&buf) {
        None => println!("INVALID ({} bytes)\n\t{}", buf.len(), hex::encode(&buf)),

        Some(frame) => match frame.meaning() {
            Some(id) => println!(
                "FRAME\n\t{id:?} = {} [t {}]",
                frame.value, frame.timestamp
            ),
            None => println!(
                "FRAME (unassigned id {})\n\t{} [t {}]",
                frame.data_id, frame.value, frame.timestamp
            ),
        },
    }

    Ok(())
}
