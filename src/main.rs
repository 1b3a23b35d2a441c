mod config;
mod error;
mod generator;
mod models;
pub mod utils;
mod web;

use anyhow::{Context, Result};
use clap::builder::RangedU64ValueParser;
use clap::{ArgAction, Parser};
use crate::config::AppConfig;
use generator::sourcing::{self, WordOrigin, WordSource};
use generator::PasswordGenerator;
use models::{GenerationParams, MAX_WORDS, MIN_WORDS};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "wordpass")]
#[command(version)]
#[command(about = "Memorable word-based passwords, on the command line or over HTTP", long_about = None)]
#[command(help_template = "\
{name} {version}
{about-section}
{usage-heading} {usage}

{all-args}
")]
struct Cli {
    /// Number of words (2 to 5)
    #[arg(short, long, value_parser = RangedU64ValueParser::<usize>::new().range((MIN_WORDS as u64)..=(MAX_WORDS as u64)))]
    words: Option<usize>,

    /// Separator placed between words (e.g. "-", "_", ".", " ")
    #[arg(short, long)]
    separator: Option<String>,

    /// How many passwords to print
    #[arg(short, long, default_value_t = 1, value_parser = RangedU64ValueParser::<usize>::new().range(1..=100))]
    count: usize,

    /// Word list file containing quoted words (defaults to the built-in list)
    #[arg(long, value_name = "FILE")]
    wordlist: Option<PathBuf>,

    /// Config file to load instead of the one in the user config dir
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Address to listen on with --serve (e.g. 127.0.0.1:8080)
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// Insert a random number between 0 and 999
    #[arg(short, long, default_value_t = false, help_heading = "Flags")]
    numbers: bool,

    /// Keep every word lowercase
    #[arg(long, default_value_t = false, help_heading = "Flags")]
    lowercase: bool,

    /// Allow the same word more than once
    #[arg(long, default_value_t = false, help_heading = "Flags")]
    allow_repeats: bool,

    /// Two lowercase words followed by one digit
    #[arg(long, default_value_t = false, help_heading = "Flags")]
    classic: bool,

    /// Run the HTTP generation endpoint
    #[arg(long, default_value_t = false, help_heading = "Flags")]
    serve: bool,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, help_heading = "Flags")]
    verbose: u8,
}

impl Cli {
    fn params(&self, defaults: GenerationParams) -> GenerationParams {
        if self.classic {
            return GenerationParams::classic();
        }

        let mut params = defaults;
        if let Some(words) = self.words {
            params.word_count = words;
        }
        if let Some(sep) = &self.separator {
            params.separator = sep.clone();
        }
        if self.numbers {
            params.numbers = Some(params.numbers.unwrap_or_default());
        }
        if self.lowercase {
            params.capitalize_first = false;
        }
        if self.allow_repeats {
            params.unique_words = false;
        }
        params
    }
}

fn init_tracing(verbosity: u8) -> Result<()> {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::from_default_env().add_directive(
        format!("wordpass={}", level)
            .parse()
            .context("invalid log directive")?,
    );
    fmt().with_env_filter(filter).with_target(true).with_writer(std::io::stderr).init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(if cli.serve { cli.verbose.max(1) } else { cli.verbose })?;

    let mut app_config = AppConfig::load(cli.config.clone()).unwrap_or_else(|e| {
        warn!("failed to load config, using defaults: {:#}", e);
        AppConfig::default()
    });
    if let Some(path) = &cli.wordlist {
        app_config.wordlist.path = Some(path.clone());
    }

    let origin = app_config.wordlist.origin();
    if let WordOrigin::File(path) = &origin {
        // a missing list is not fatal, requests will report it
        if let Err(e) = sourcing::read_asset(path) {
            warn!("{}", e);
        }
    }

    let source = WordSource::new(origin, app_config.wordlist.bounds(), app_config.wordlist.cache);
    let generator = PasswordGenerator::new(source);
    let defaults = app_config.generator.params()?;

    if cli.serve {
        let addr = match cli.bind {
            Some(addr) => addr,
            None => app_config
                .server
                .bind
                .parse()
                .with_context(|| format!("invalid bind address {}", app_config.server.bind))?,
        };
        info!(origin = ?generator.source().origin(), "starting server");
        let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
        return runtime.block_on(web::serve(addr, web::router(generator, defaults)));
    }

    let params = cli.params(defaults).validate()?;
    for _ in 0..cli.count {
        let password = generator.generate(&params)?;
        println!("{}", password);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::NumberToken;

    #[test]
    fn cli_flags_override_defaults() {
        let cli = Cli::parse_from([
            "wordpass", "-w", "4", "-s", "_", "--numbers", "--lowercase", "--allow-repeats",
        ]);
        let params = cli.params(GenerationParams::default());
        assert_eq!(params.word_count, 4);
        assert_eq!(params.separator, "_");
        assert_eq!(params.numbers, Some(NumberToken::default()));
        assert!(!params.capitalize_first);
        assert!(!params.unique_words);
    }

    #[test]
    fn classic_flag_wins() {
        let cli = Cli::parse_from(["wordpass", "--classic", "-w", "5"]);
        assert_eq!(cli.params(GenerationParams::default()), GenerationParams::classic());
    }

    #[test]
    fn word_count_out_of_range_rejected() {
        assert!(Cli::try_parse_from(["wordpass", "-w", "9"]).is_err());
        assert!(Cli::try_parse_from(["wordpass", "-w", "1"]).is_err());
    }
}
