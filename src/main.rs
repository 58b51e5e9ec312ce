use clap::Parser;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use avault::cli::{Cli, Commands};

/// Environment variable overriding the log filter (e.g. `avault=debug`).
const LOG_ENV: &str = "AVAULT_LOG";

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays usable for decrypted output.
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_filter));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        avault::cli::output::warning(&format!("Logging disabled: {e}"));
    }

    let result = match cli.command {
        Commands::Encrypt {
            ref files,
            ref output,
            ref label,
        } => avault::cli::commands::encrypt::execute(
            &cli,
            files,
            output.as_deref(),
            label.as_deref(),
        ),
        Commands::Decrypt {
            ref files,
            ref output,
        } => avault::cli::commands::decrypt::execute(&cli, files, output.as_deref()),
        Commands::View { ref file } => avault::cli::commands::view::execute(&cli, file),
        Commands::Rekey { ref files } => avault::cli::commands::rekey::execute(&cli, files),
        Commands::EncryptString {
            ref value,
            ref name,
            ref label,
        } => avault::cli::commands::encrypt_string::execute(
            &cli,
            value.as_deref(),
            name.as_deref(),
            label.as_deref(),
        ),
        Commands::Completions { shell } => avault::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        avault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
