use structopt::StructOpt as _;

use runtime::{
    Dispatcher,
    NeutralLaw,
    ShutdownHandle,
};

pub use crate::options::Options;

mod options;
mod trace;

/// Halts the host the way the deployed image expects: the daemon runs as an
/// unprivileged user with a sudo rule for exactly this command.
struct SystemShutdown;

impl ShutdownHandle for SystemShutdown {
    fn shutdown(&self) {
        tracing::warn!("halting host");

        let result = std::process::Command::new("sudo")
            .args(["/sbin/shutdown", "-h", "now"])
            .spawn();

        util::trace_catch!(result, "invoking system shutdown");
    }
}

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

    let builder = tokio_serial::new(&options.port, options.baud);
    let stream = tokio_serial::SerialStream::open(&builder)?;

    tracing::info!(port = %options.port, baud = options.baud, "listening on serial link");

    runtime::slave::serve(stream, Dispatcher::new(NeutralLaw, SystemShutdown)).await?;

    tracing::info!("link closed, exiting");

    Ok(())
}
