use clap::Parser;
use tabulon_cli::{init_logging, run, Cli};

fn main() {
    let cli = Cli::parse();
    if let Err(err) = init_logging(cli.verbose) {
        eprintln!("warning: {:#}", err);
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Err(err) = run(&cli, &mut out) {
        log::debug!("command failed: {:?}", err);
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}
