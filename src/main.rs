//! alt-lint CLI
//!
//! Lints serialized JSX element trees for images without a text alternative.

use alt_lint::config::{ColorMode, Config, OutputFormat};
use alt_lint::engine::Engine;
use alt_lint::output::formatter_for;
use alt_lint::rules;
use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use glob::glob;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "alt-lint",
    version,
    about = "Image alt-text linter for JSX element trees",
    long_about = "Checks JSON-serialized JSX element trees for image-rendering elements \
                  without a usable text alternative."
)]
struct Cli {
    /// Files, directories or glob patterns to lint
    files: Vec<String>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Disable specific rules (comma-separated)
    #[arg(long, value_delimiter = ',')]
    disable: Option<Vec<String>>,

    /// Component names that render images (comma-separated, replaces `img`)
    #[arg(long, value_delimiter = ',')]
    components: Option<Vec<String>>,

    /// Hide the summary line
    #[arg(long)]
    no_stats: bool,

    /// List available rules and exit
    #[arg(long)]
    list_rules: bool,

    /// Explain a rule and exit
    #[arg(long, value_name = "RULE")]
    explain: Option<String>,
}

fn list_rules() {
    for meta in rules::all_meta() {
        println!(
            "{:<16} {:<12} {:<8} {}",
            meta.id.cyan(),
            meta.category.to_string(),
            meta.severity.to_string(),
            meta.description
        );
    }
}

fn explain(rule_id: &str) -> Result<()> {
    match rules::find_meta(rule_id) {
        Some(meta) => {
            print!("{}", meta.explain());
            Ok(())
        }
        None => bail!("Unknown rule: {}", rule_id),
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::load_default().context("Failed to load config")?,
    };

    config.merge_cli(
        cli.format,
        cli.verbose.then_some(true),
        cli.jobs,
        cli.disable.clone(),
        cli.components.clone(),
    );
    if cli.no_stats {
        config.output.statistics = Some(false);
    }
    Ok(config)
}

/// Expand CLI arguments into the list of files to lint
fn collect_files(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_dir() {
            let dir_pattern = path.join("**").join("*.json");
            files.extend(expand_glob(&dir_pattern.to_string_lossy())?);
        } else if path.exists() {
            files.push(path.to_path_buf());
        } else {
            let matched = expand_glob(pattern)?;
            if matched.is_empty() {
                log::warn!("No files match {}", pattern);
            }
            files.extend(matched);
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

fn expand_glob(pattern: &str) -> Result<Vec<PathBuf>> {
    let paths = glob(pattern).with_context(|| format!("Invalid glob pattern: {}", pattern))?;
    Ok(paths
        .filter_map(|entry| match entry {
            Ok(path) if path.is_file() => Some(path),
            Ok(_) => None,
            Err(e) => {
                log::warn!("Cannot read {}: {}", e.path().display(), e);
                None
            }
        })
        .collect())
}

fn run(cli: Cli) -> Result<i32> {
    if cli.list_rules {
        list_rules();
        return Ok(0);
    }
    if let Some(rule_id) = &cli.explain {
        explain(rule_id)?;
        return Ok(0);
    }

    let config = load_config(&cli)?;

    let colored = !cli.no_color
        && match config.output.color() {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        };
    colored::control::set_override(colored);

    let patterns = if cli.files.is_empty() {
        vec![".".to_string()]
    } else {
        cli.files.clone()
    };
    let files = collect_files(&patterns)?;
    if files.is_empty() {
        bail!("No files to lint");
    }

    if config.output.verbose() {
        eprintln!("Linting {} file(s)", files.len());
    }

    let formatter = formatter_for(
        config.output.format(),
        colored,
        config.output.statistics(),
    );
    let engine = Engine::new(config);
    log::debug!("{} rule(s) enabled", engine.rules().len());

    let result = engine.lint(&files);
    print!("{}", formatter.format(&result));

    Ok(result.exit_code())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if cli.no_color {
        colored::control::set_override(false);
    }

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{}: {:#}", "error".red().bold(), e);
            std::process::exit(2);
        }
    }
}
