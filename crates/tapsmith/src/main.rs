//! tapsmith CLI application

use std::io;
use tapsmith::cli::{self, EXIT_OK, LogLevel, exit_code_for, render_error};
use tapsmith::{CliError, Commands, RenderOptions, execute_check, execute_render};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = cli::parse();
    init_tracing(cli.level);

    let exit_code = match run(cli.command) {
        Ok(()) => EXIT_OK,
        Err(err) => {
            render_error(&err);
            exit_code_for(&err)
        }
    };
    std::process::exit(exit_code);
}

/// Logs go to stderr so rendered manifests can be piped from stdout.
fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_filter()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn run(command: Commands) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Commands::Render {
            release_file,
            kind,
            encoding,
            output,
            release_version,
        } => {
            let options = RenderOptions {
                release_file,
                kind,
                encoding,
                output,
                release_version,
            };
            execute_render(&options, &mut out)
        }
        Commands::Check { release_file } => execute_check(&release_file, &mut out),
    }
}
