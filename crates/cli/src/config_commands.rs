use std::path::{Path, PathBuf};

use {
    anyhow::{Result, bail},
    clap::Subcommand,
    mtsend_config::{Error, MtsendConfig},
};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Validate the configuration file and report problems.
    Check {
        /// Config file to check instead of the discovered one.
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

pub fn handle_config(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Check { path } => check(path.as_deref()),
    }
}

/// ANSI color codes.
const RED: &str = "\x1b[31m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

fn check(path: Option<&Path>) -> Result<()> {
    let Some(path) = path.map(Path::to_path_buf).or_else(mtsend_config::find_config_file) else {
        eprintln!("No config file found; checking defaults.\n");
        print_summary(&MtsendConfig::default());
        eprintln!("No issues found.");
        return Ok(());
    };

    eprintln!("Checking {}\n", path.display());
    match mtsend_config::load_config(&path) {
        Ok(config) => {
            print_summary(&config);
            eprintln!("No issues found.");
            Ok(())
        },
        Err(Error::Invalid { problems }) => {
            for problem in &problems {
                eprintln!("  {BOLD}{RED}error{RESET} {problem}");
            }
            eprintln!();
            bail!("{} error(s) in {}", problems.len(), path.display())
        },
        Err(e) => Err(e.into()),
    }
}

fn print_summary(config: &MtsendConfig) {
    let upload = &config.upload;
    let send = &config.send;
    eprintln!("  upload.part_size           {}", upload.part_size);
    eprintln!("  upload.big_file_threshold  {}", upload.big_file_threshold);
    eprintln!("  upload.max_file_size       {}", upload.max_file_size);
    eprintln!("  send.parse_mode            {:?}", send.parse_mode);
    if let Some(max) = send.max_part_recovery_attempts {
        eprintln!("  send.max_part_recovery     {max}");
    }
    if let Some(secs) = send.timeout_secs {
        eprintln!("  send.timeout_secs          {secs}");
    }
    eprintln!();
}
