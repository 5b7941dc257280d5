use std::path::PathBuf;
use std::time::Duration;

use apiboard_core::TRANSLATION_CALLS_PER_HOUR;
use apiboard_engine::{ClientConfig, FetchSettings};
use clap::Parser;
use log::LevelFilter;

use super::logging::LogDestination;

#[derive(Parser, Debug)]
#[command(
    name = "apiboard",
    version,
    about = "Terminal dashboard of independent public-API widgets"
)]
pub struct Cli {
    /// Fetch every widget once, print the dashboard and exit.
    #[arg(long)]
    pub once: bool,
    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,
    /// Translation calls allowed per hour.
    #[arg(long, default_value_t = TRANSLATION_CALLS_PER_HOUR)]
    pub translation_limit: u32,
    /// Also write logs to this file.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
    /// Log request-level detail.
    #[arg(long, short)]
    pub verbose: bool,
}

impl Cli {
    pub fn log_destination(&self) -> LogDestination {
        match &self.log_file {
            Some(path) => LogDestination::Both(path.clone()),
            None => LogDestination::Terminal,
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        let defaults = FetchSettings::default();
        let request_timeout = Duration::from_secs(self.timeout_secs.max(1));
        ClientConfig {
            settings: FetchSettings {
                connect_timeout: defaults.connect_timeout.min(request_timeout),
                request_timeout,
                ..defaults
            },
            ..ClientConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_upstream_quota() {
        let cli = Cli::parse_from(["apiboard"]);
        assert!(!cli.once);
        assert_eq!(cli.translation_limit, 5);
        assert_eq!(cli.log_level(), LevelFilter::Warn);
        assert!(matches!(cli.log_destination(), LogDestination::Terminal));
    }

    #[test]
    fn short_timeout_also_caps_connect_timeout() {
        let cli = Cli::parse_from(["apiboard", "--once", "--timeout-secs", "3", "-v"]);
        let config = cli.client_config();
        assert_eq!(config.settings.request_timeout, Duration::from_secs(3));
        assert_eq!(config.settings.connect_timeout, Duration::from_secs(3));
        assert_eq!(cli.log_level(), LevelFilter::Debug);
    }
}
