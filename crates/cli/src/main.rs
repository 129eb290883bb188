mod config_commands;
mod file_id_commands;

use {
    clap::{Parser, Subcommand},
    tracing::debug,
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

#[derive(Parser)]
#[command(name = "mtsend", about = "mtsend: file identifiers and send configuration")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect or build file identifiers.
    FileId {
        #[command(subcommand)]
        action: file_id_commands::FileIdAction,
    },
    /// Configuration management.
    Config {
        #[command(subcommand)]
        action: config_commands::ConfigAction,
    },
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so command output on stdout stays machine-readable.
    if cli.json_logs {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_ansi(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_telemetry(&cli);

    debug!(version = env!("CARGO_PKG_VERSION"), "mtsend starting");

    match cli.command {
        Commands::FileId { action } => file_id_commands::handle_file_id(action),
        Commands::Config { action } => config_commands::handle_config(action),
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_file_id_encode() {
        let cli = Cli::try_parse_from([
            "mtsend",
            "file-id",
            "encode",
            "--media-type",
            "10",
            "--dc-id",
            "2",
            "--media-id",
            "-5",
            "--access-hash",
            "9",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::FileId { .. }));
        assert_eq!(cli.log_level, "info");
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["mtsend", "config", "check", "--json-logs"]).unwrap();
        assert!(cli.json_logs);
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["mtsend"]).is_err());
    }
}
