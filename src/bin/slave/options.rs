#[derive(Debug, Clone, PartialEq, Eq, structopt::StructOpt)]
#[structopt(name = "slave", about = "serial-connected GNC slave daemon")]
pub struct Options {
    /// Serial device the flight computer is wired to.
    #[structopt(long, default_value = "/dev/serial0")]
    pub port: String,

    #[structopt(long, default_value = "115200")]
    pub baud: u32,
}
