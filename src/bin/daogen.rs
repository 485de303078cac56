use clap::Parser;
use daogen::cli::{run_cli, Cli};
use daogen::GenerateError;

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run_cli(cli) {
        eprintln!("error: {err:#}");
        let code = err
            .downcast_ref::<GenerateError>()
            .map_or(1, GenerateError::exit_code);
        std::process::exit(code);
    }
}
