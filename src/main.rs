//! godecl CLI entry point.

use clap::Parser;
use godecl::cli::{self, Cli};
use godecl::error::{ExtractError, EXIT_SUCCESS};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version land here too; they go to stdout.
        Err(e) if !e.use_stderr() => {
            let _ = e.print();
            std::process::exit(EXIT_SUCCESS);
        }
        Err(e) => {
            let err = ExtractError::Argument(e.render().to_string());
            eprint!("{}", err);
            std::process::exit(err.exit_code());
        }
    };

    cli::init_logging(cli.verbose);

    let exit_code = match cli::run(&cli) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            cli::report_error(&e);
            cli::exit_code(&e)
        }
    };

    std::process::exit(exit_code);
}
