use clap::Parser;
use volstats::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
