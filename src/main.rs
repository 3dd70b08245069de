use clap::Parser;
use scope_viewer::cli::{Cli, Command};
use scope_viewer::{cmd_init, cmd_serve};
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("scope_viewer=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let exit_code = match cli.command {
        Command::Serve(args) => cmd_serve(args),
        Command::Init(args) => cmd_init(args),
    };

    std::process::exit(exit_code);
}
