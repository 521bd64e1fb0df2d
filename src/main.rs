use clap::Parser;
use schedule::cli::commands::Cli;
use schedule::cli::handlers;
use schedule::io::config_io::load_config;
use schedule::io::log::init_logging;

fn main() {
    let cli = Cli::parse();
    init_logging();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        // No subcommand → launch TUI
        None => schedule::tui::run(&config),
        Some(_) => handlers::dispatch(cli, &config),
    };
    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
