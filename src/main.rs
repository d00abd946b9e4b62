use clap::Parser;

use gocoverdir::cli::Cli;

fn main() {
    let cli = Cli::parse();
    std::process::exit(gocoverdir::commands::run(&cli));
}
