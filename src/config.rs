//! Runtime configuration.
//!
//! The API base URL comes from the `API_BASE_URL` environment variable and
//! falls back to a local development server.  Command-line flags override the
//! environment.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const POSTS_PATH: &str = "/api/posts";
pub const DEFAULT_REFRESH_SECS: u64 = 5 * 60;
pub const MAX_REFRESH_SECS: u64 = 365 * 24 * 60 * 60;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "postboard", version, about = "Live view of the latest posts")]
pub struct Cli {
    /// Base URL of the posts API (overrides API_BASE_URL)
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Seconds between automatic refreshes
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_REFRESH_SECS,
          value_parser = clap::value_parser!(u64).range(1..=MAX_REFRESH_SECS))]
    pub interval: u64,

    /// Write diagnostics to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_base_url: String,
    pub refresh_interval: Duration,
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Build the configuration from the process environment and `cli`.
    pub fn from_env(cli: Cli) -> Self {
        Self::from_lookup(cli, |key| env::var(key).ok())
    }

    /// Build the configuration using `lookup` to read environment variables.
    pub fn from_lookup(cli: Cli, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_base_url = cli
            .base_url
            .or_else(|| lookup("API_BASE_URL").filter(|v| !v.is_empty()))
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        Self {
            api_base_url,
            refresh_interval: Duration::from_secs(cli.interval),
            log_file: cli.log_file,
        }
    }

    /// Full URL of the post list endpoint.
    pub fn posts_endpoint(&self) -> String {
        format!("{}{POSTS_PATH}", self.api_base_url.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("postboard").chain(args.iter().copied())).unwrap()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_without_env_or_flags() {
        let config = Config::from_lookup(cli(&[]), no_env);

        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.refresh_interval, Duration::from_secs(300));
        assert_eq!(config.posts_endpoint(), "http://localhost:8000/api/posts");
        assert!(config.log_file.is_none());
    }

    #[test]
    fn env_overrides_default_base_url() {
        let config = Config::from_lookup(cli(&[]), |key| {
            (key == "API_BASE_URL").then(|| "https://api.example.com".to_string())
        });

        assert_eq!(config.posts_endpoint(), "https://api.example.com/api/posts");
    }

    #[test]
    fn empty_env_value_is_ignored() {
        let config = Config::from_lookup(cli(&[]), |_| Some(String::new()));
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn flag_overrides_env() {
        let config = Config::from_lookup(cli(&["--base-url", "http://flag:9000"]), |_| {
            Some("http://env:8000".to_string())
        });

        assert_eq!(config.api_base_url, "http://flag:9000");
    }

    #[test]
    fn trailing_slash_is_not_doubled() {
        let config = Config::from_lookup(cli(&["--base-url", "http://host:1/"]), no_env);
        assert_eq!(config.posts_endpoint(), "http://host:1/api/posts");
    }

    #[test]
    fn interval_and_log_file_flags() {
        let config = Config::from_lookup(
            cli(&["--interval", "30", "--log-file", "/tmp/postboard.log"]),
            no_env,
        );

        assert_eq!(config.refresh_interval, Duration::from_secs(30));
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/postboard.log")));
    }

    #[test]
    fn interval_above_one_year_is_rejected() {
        assert!(Cli::try_parse_from(["postboard", "--interval", "18446744073709551615"]).is_err());

        let max = MAX_REFRESH_SECS.to_string();
        let config = Config::from_lookup(cli(&["--interval", &max]), no_env);
        assert_eq!(config.refresh_interval, Duration::from_secs(MAX_REFRESH_SECS));
    }

    #[test]
    fn zero_interval_is_rejected() {
        let result = Cli::try_parse_from(["postboard", "--interval", "0"]);
        assert!(result.is_err());
    }
}
