#![forbid(unsafe_code)]

//! poolscope CLI entry point.

use clap::Parser;

mod cli_app;

fn main() {
    env_logger::init();
    let args = cli_app::Cli::parse();
    if let Err(e) = cli_app::run(&args) {
        eprintln!("poolscope: {e}");
        std::process::exit(1);
    }
}
