use clap::Parser;

/// Interactive operator for a three-level priority buffer.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// TOML settings file. Without it `strata.toml` in the working
    /// directory is used when present.
    #[arg(short, long, required = false)]
    pub config: Option<String>,
}
