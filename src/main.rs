use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use ethos_score::config::{self, ConfigSource};
use ethos_score::output::{self, ScoreReport};
use ethos_score::scoring::{self, ElementInputs, ScoreConfig};
use ethos_score::{verbose_eprintln, warn_eprintln};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 1;
const EXIT_SCORE: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Table,
    Tsv,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Calculate a score from raw inputs and explain its factors
    Score {
        /// YAML or JSON file mapping element names to raw values
        #[arg(short, long)]
        inputs: Option<PathBuf>,

        /// Set a single input, e.g. --set "Ethereum Address Age=400" (repeatable)
        #[arg(short, long = "set", value_name = "NAME=VALUE")]
        set: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Fail on missing inputs or non-finite values instead of reporting them
        #[arg(long)]
        strict: bool,

        /// Also write the JSON report to this file
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Show the level and XP multiplier for a score
    Level {
        #[arg(allow_negative_numbers = true)]
        score: f64,
    },
    /// List score levels with their bounds and XP multipliers
    Ranges,
    /// Check a score config for structural problems
    Validate,
    /// Write the built-in score config to disk
    Init {
        /// Destination (defaults to ~/.config/ethos-score/config.yaml)
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "ethos-score")]
#[command(about = "Credibility score calculator", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to score config file (defaults to ~/.config/ethos-score/config.yaml, then the built-in config)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();
    ethos_score::diagnostics::set_verbose(cli.verbose);
    let config_path = cli.config.map(PathBuf::from);

    let code = match cli.command {
        Commands::Score {
            inputs,
            set,
            format,
            strict,
            out,
        } => run_score(config_path, inputs, &set, format, strict, out),
        Commands::Level { score } => run_level(score),
        Commands::Ranges => {
            println!("{}", output::format_ranges(output::should_use_colors()));
            EXIT_SUCCESS
        }
        Commands::Validate => match load_validated_config(config_path) {
            Ok(config) => {
                println!(
                    "Config OK: {} element definitions, root '{}'",
                    config.element_definitions.len(),
                    config.root_calculation.name
                );
                EXIT_SUCCESS
            }
            Err(code) => code,
        },
        Commands::Init { path, force } => run_init(path, force),
    };

    std::process::exit(code);
}

/// Load and validate the score config, printing every problem on failure.
fn load_validated_config(path: Option<PathBuf>) -> Result<ScoreConfig, i32> {
    let (config, source) = match config::load_score_config(path) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            return Err(EXIT_CONFIG);
        }
    };

    match &source {
        ConfigSource::File(p) => verbose_eprintln!("Loaded score config from {}", p.display()),
        ConfigSource::BuiltIn => verbose_eprintln!("Using built-in score config"),
    }

    if let Err(errors) = scoring::validate_score_config(&config) {
        eprintln!("Score config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(EXIT_CONFIG);
    }

    Ok(config)
}

fn run_score(
    config_path: Option<PathBuf>,
    inputs_path: Option<PathBuf>,
    set: &[String],
    format: OutputFormat,
    strict: bool,
    out: Option<PathBuf>,
) -> i32 {
    let config = match load_validated_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let mut inputs = match inputs_path {
        Some(ref p) => match config::load_inputs(p) {
            Ok(i) => i,
            Err(e) => {
                eprintln!("Input error: {:#}", e);
                return EXIT_INPUT;
            }
        },
        None => ElementInputs::new(),
    };
    if let Err(e) = config::apply_overrides(&mut inputs, set) {
        eprintln!("Input error: {:#}", e);
        return EXIT_INPUT;
    }

    verbose_eprintln!("Config expects: {}", config.input_names().join(", "));
    verbose_eprintln!("Evaluating {} inputs", inputs.len());
    for (name, value) in &inputs {
        if config.definition(name).is_none() {
            verbose_eprintln!("  {} = {} (not a defined element)", name, value);
        } else {
            verbose_eprintln!("  {} = {}", name, value);
        }
    }

    if strict {
        if let Err(e) = scoring::try_calculate_score(&config.root_calculation, &inputs) {
            eprintln!("Score error: {}", e);
            return EXIT_SCORE;
        }
    }

    let explanation = scoring::explain_score(&config, &inputs);
    let report = ScoreReport::new(&config, &explanation);

    // Warnings follow the report on stderr
    ethos_score::diagnostics::activate();
    for name in &report.errors {
        warn_eprintln!("Warning: missing or invalid input for '{}'", name);
    }
    if let (Some(score), None) = (report.score, report.level) {
        warn_eprintln!("Warning: {}", ethos_score::ScoreError::InvalidScore(score));
    }

    let rendered = match format {
        OutputFormat::Table => Ok(output::format_report(&report, output::should_use_colors())),
        OutputFormat::Tsv => Ok(output::format_tsv(&report.factors)),
        OutputFormat::Json => report.to_json(),
    };
    match rendered {
        Ok(text) => println!("{}", text),
        Err(e) => {
            ethos_score::diagnostics::flush();
            eprintln!("Output error: {:#}", e);
            return EXIT_SCORE;
        }
    }
    ethos_score::diagnostics::flush();

    if let Some(path) = out {
        if let Err(e) = report.save(&path) {
            eprintln!("Failed to write report: {:#}", e);
            return EXIT_SCORE;
        }
        verbose_eprintln!("Report written to {}", path.display());
    }

    if report.score.is_none() || report.level.is_none() {
        EXIT_SCORE
    } else {
        EXIT_SUCCESS
    }
}

fn run_level(score: f64) -> i32 {
    match scoring::convert_score_to_level(score) {
        Ok(level) => {
            let use_colors = output::should_use_colors();
            println!(
                "{}  XP x{}",
                output::format_level(level, use_colors),
                output::format_number(level.xp_multiplier())
            );
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            EXIT_SCORE
        }
    }
}

fn run_init(path: Option<PathBuf>, force: bool) -> i32 {
    let path = match path.map_or_else(config::get_config_path, Ok) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            return EXIT_CONFIG;
        }
    };

    match config::write_score_config(&path, &ScoreConfig::default(), force) {
        Ok(()) => {
            println!("Config written to {}", path.display());
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            EXIT_CONFIG
        }
    }
}
