use clap::Parser;
use fintrack::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
