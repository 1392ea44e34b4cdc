use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use weatherlog::{Logbook, Pipeline, WeatherApiClient, WeatherLogConfig};

/// Parsed command line: an optional config path and the place-name words
struct CliArgs {
    config_path: Option<PathBuf>,
    query: Option<String>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<CliArgs, String> {
    let mut config_path = None;
    let mut words = Vec::new();

    while let Some(arg) = args.next() {
        if arg == "--config" {
            match args.next() {
                Some(path) => config_path = Some(PathBuf::from(path)),
                None => return Err("--config requires a file path".to_string()),
            }
        } else {
            words.push(arg);
        }
    }

    let query = if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    };

    Ok(CliArgs { config_path, query })
}

fn init_tracing(level: &str) {
    // RUST_LOG wins over the configured level; logs go to stderr so the
    // report on stdout stays clean.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_place_interactively() -> anyhow::Result<String> {
    println!("=== weatherlog ===");
    print!("Enter a place (e.g., 'Mumbai', 'London, UK'): ");
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    Ok(line.trim().to_string())
}

fn main() -> ExitCode {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::from(2);
        }
    };

    let config = match WeatherLogConfig::load_from_path(args.config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e.user_message());
            return ExitCode::from(e.exit_code());
        }
    };

    init_tracing(&config.logging.level);

    let query = match args.query {
        Some(query) => query,
        None => match read_place_interactively() {
            Ok(query) => query,
            Err(e) => {
                eprintln!("{e:#}");
                return ExitCode::from(5);
            }
        },
    };

    let api = match WeatherApiClient::new(&config) {
        Ok(api) => api,
        Err(e) => {
            eprintln!("{}", e.user_message());
            return ExitCode::from(e.exit_code());
        }
    };

    let mut pipeline = Pipeline::new(api, Logbook::new(config.log.path));
    let mut stdout = io::stdout();
    match pipeline.run(&query, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.user_message());
            ExitCode::from(e.exit_code())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args_joins_place_words() {
        let args = parse_args(["London", "UK"].iter().map(ToString::to_string)).unwrap();
        assert_eq!(args.query.as_deref(), Some("London UK"));
        assert!(args.config_path.is_none());
    }

    #[test]
    fn test_parse_args_extracts_config_path() {
        let args = parse_args(
            ["--config", "custom.toml", "Oslo"]
                .iter()
                .map(ToString::to_string),
        )
        .unwrap();
        assert_eq!(args.config_path, Some(PathBuf::from("custom.toml")));
        assert_eq!(args.query.as_deref(), Some("Oslo"));
    }

    #[test]
    fn test_parse_args_without_place_prompts_later() {
        let args = parse_args(std::iter::empty()).unwrap();
        assert!(args.query.is_none());
    }

    #[test]
    fn test_parse_args_config_without_value_is_an_error() {
        let result = parse_args(["--config"].iter().map(ToString::to_string));
        assert!(result.is_err());
    }
}
