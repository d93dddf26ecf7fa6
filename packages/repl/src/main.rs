use clap::Parser;

use recordform_repl::{logging, Cli, Config, ExitReason};

fn main() {
    let cli = Cli::parse();
    logging::init();

    let config = match Config::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    // Run the REPL
    match recordform_repl::run(&config) {
        Ok(ExitReason::LoadFailed) => std::process::exit(1),
        Ok(_) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
