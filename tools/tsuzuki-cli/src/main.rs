//! Tsuzuki command-line tool
//!
//! Reads release filenames from arguments (or stdin, one per line) and prints
//! episode numbers, provider patterns, or which labels a stored pattern
//! accepts.

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use tsuzuki_core::{
    EpisodeRule, ExtractorConfig, PatternExtraction, ProviderPattern, ProviderPatternExtractor,
    TrackMatcher,
};

/// CLI arguments
#[derive(Parser)]
#[command(name = "tsuzuki")]
#[command(about = "Episode numbers and provider patterns for release filenames")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Extractor configuration file (JSON)
    #[arg(short, long, env = "TSUZUKI_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Print one JSON object per line
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the episode number found in each filename
    Episode {
        /// Filenames; read from stdin when omitted
        names: Vec<String>,
    },
    /// Print the provider pattern derived from each filename
    Pattern {
        /// Filenames; read from stdin when omitted
        names: Vec<String>,
    },
    /// Test labels against a provider pattern
    Match {
        /// The stored provider pattern
        #[arg(short, long)]
        pattern: String,
        /// Labels; read from stdin when omitted
        labels: Vec<String>,
    },
}

#[derive(Debug, Serialize)]
struct EpisodeOutput<'a> {
    input: &'a str,
    episode: Option<u32>,
    rule: Option<EpisodeRule>,
}

#[derive(Debug, Serialize)]
struct PatternOutput<'a> {
    input: &'a str,
    #[serde(flatten)]
    extraction: PatternExtraction,
}

#[derive(Debug, Serialize)]
struct MatchOutput<'a> {
    input: &'a str,
    matched: bool,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Arguments if any were given, otherwise trimmed non-empty stdin lines.
fn inputs(args: Vec<String>) -> Result<Vec<String>> {
    if !args.is_empty() {
        return Ok(args);
    }
    let mut lines = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read stdin")?;
        let line = line.trim();
        if !line.is_empty() {
            lines.push(line.to_string());
        }
    }
    Ok(lines)
}

fn load_extractor(path: Option<&PathBuf>) -> Result<ProviderPatternExtractor> {
    let config = match path {
        Some(path) => {
            debug!(path = %path.display(), "loading extractor config");
            ExtractorConfig::from_json_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?
        }
        None => ExtractorConfig::default(),
    };
    ProviderPatternExtractor::with_config(config).context("failed to build extractor")
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

fn run_episode(extractor: &ProviderPatternExtractor, names: &[String], json: bool) -> Result<()> {
    for name in names {
        let found = extractor.parser().parse_detailed(name);
        if json {
            print_json(&EpisodeOutput {
                input: name,
                episode: found.as_ref().map(|m| m.number),
                rule: found.as_ref().map(|m| m.rule),
            })?;
        } else {
            match found {
                Some(m) => println!("{}\t{}\t{}", m.number, m.rule, name),
                None => println!("-\t-\t{name}"),
            }
        }
    }
    Ok(())
}

fn run_pattern(extractor: &ProviderPatternExtractor, names: &[String], json: bool) -> Result<()> {
    for name in names {
        let extraction = extractor.extract_detailed(name);
        if json {
            print_json(&PatternOutput {
                input: name,
                extraction,
            })?;
        } else {
            println!("{}", extraction.pattern);
        }
    }
    Ok(())
}

fn run_match(pattern: &str, labels: &[String], json: bool) -> Result<bool> {
    let pattern = ProviderPattern::new(pattern);
    let matcher = TrackMatcher::new(&pattern)?;

    for label in labels {
        let matched = matcher.is_match(label);
        if json {
            print_json(&MatchOutput {
                input: label,
                matched,
            })?;
        } else {
            println!("{}\t{}", if matched { "match" } else { "-" }, label);
        }
    }

    let first = matcher.find_first(labels);
    info!(pattern = pattern.as_str(), first = ?first, "match finished");
    Ok(first.is_some())
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Episode { names } => {
            let extractor = load_extractor(cli.config.as_ref())?;
            run_episode(&extractor, &inputs(names)?, cli.json)?;
        }
        Commands::Pattern { names } => {
            let extractor = load_extractor(cli.config.as_ref())?;
            run_pattern(&extractor, &inputs(names)?, cli.json)?;
        }
        Commands::Match { pattern, labels } => {
            if !run_match(&pattern, &inputs(labels)?, cli.json)? {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["tsuzuki", "pattern", "--json", "-v", "Show - 01.srt"]).unwrap();
        assert!(cli.json);
        assert!(cli.verbose);
        match cli.command {
            Commands::Pattern { names } => assert_eq!(names, vec!["Show - 01.srt"]),
            _ => panic!("expected pattern subcommand"),
        }
    }

    #[test]
    fn match_requires_pattern() {
        assert!(Cli::try_parse_from(["tsuzuki", "match", "label"]).is_err());
    }

    #[test]
    fn run_match_reports_any_hit() {
        let labels = vec!["Show - 02.srt".to_string(), "Other - 02.srt".to_string()];
        assert!(run_match(r"^Show \- \d+\.srt$", &labels, true).unwrap());
        assert!(!run_match(r"^Nope$", &labels, false).unwrap());
        assert!(run_match("^(broken$", &labels, false).is_err());
    }

    #[test]
    fn pattern_output_flattens_extraction() {
        let extractor = ProviderPatternExtractor::new().unwrap();
        let output = PatternOutput {
            input: "Show - 01.srt",
            extraction: extractor.extract_detailed("Show - 01.srt"),
        };
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["input"], "Show - 01.srt");
        assert_eq!(value["pattern"], r"^Show \- \d+\.srt$");
        assert_eq!(value["episode"], 1);
        assert_eq!(value["rule"], "loose_numeral");
        assert_eq!(value["wildcard"], false);
    }
}
