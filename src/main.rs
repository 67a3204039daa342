use clap::Parser;
use pairdrill::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
