//! RWQ CLI - Command line dashboard for river water quality pH data.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "rwq-cli",
    version,
    about = "River water quality pH dashboard"
)]
struct Cli {
    #[command(flatten)]
    global: rwq_cmd::config::GlobalArgs,

    #[command(subcommand)]
    command: rwq_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("cli: {:?}", cli.command);
    rwq_cmd::run(cli.global, cli.command)
}
