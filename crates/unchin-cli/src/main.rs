//! Unchin - fare comparison for trucks and light vans
//!
//! A CLI tool that prices one job under the standard truck tariffs or the
//! Akabou tariff and ranks the results.

mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();
    unchin_app::init_logging(cli.verbose);

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        if let Some(hint) = commands::hint_for(&e) {
            eprintln!("Hint: {}", hint);
        }
        std::process::exit(1);
    }
}
