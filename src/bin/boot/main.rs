use structopt::StructOpt as _;
use tokio::net::UdpSocket;

use net::BusOps as _;
use runtime::ground;

pub use crate::options::Options;

mod options;
mod trace;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    util::bootstrap!(
        "starting {} {} ({}, built at {} with rustc {})",
        util::build::PACKAGE,
        util::build::VERSION,
        util::build::COMMIT_HASH,
        util::build::BUILD_TIMESTAMP,
        util::build::RUSTC_COMMIT_HASH,
    );

    let options: Options = Options::from_args();

    trace::init();

    let bus = UdpSocket::open(&options.bus_config()).await?;

    ground::boot(&bus).await?;
    ground::monitor(&bus, options.recv_timeout()).await?;

    Ok(())
}
