use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use tooltip_text_merge::{
    MergeConfig, MergeEngine, Plain, RarityColours, StructuredResponse, TierSection,
    TierStrategy, VariantDecorator,
};

#[derive(Parser)]
#[command(name = "tooltip-merge")]
#[command(about = "Merge parallel tooltip descriptions into compact text", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Print results as a JSON array instead of one per line
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge a JSON array of parallel strings
    Fuzzy(FuzzyArgs),

    /// Merge a JSON object of tier number to text
    Tiers(TierArgs),

    /// Merge a JSON array of labelled tier sections, one line per section
    Sections(SectionArgs),

    /// Combine and render a JSON array of structured responses
    Combine(CombineArgs),
}

#[derive(Args)]
struct InputArgs {
    /// Read JSON from this file instead of stdin
    #[arg(short, long)]
    input: Option<PathBuf>,
}

#[derive(Args)]
struct FuzzyArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Override the maximum replacement fraction
    #[arg(long)]
    fraction: Option<f64>,
}

#[derive(Args)]
struct TierArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Record name used in diagnostics
    #[arg(long, default_value = "tiers")]
    key: String,

    /// How tiers are presented
    #[arg(long, value_enum, default_value_t = TierMode::Wordwise)]
    strategy: TierMode,

    /// Wrap every tier's value in its rarity colour
    #[arg(long)]
    colour: bool,
}

#[derive(Args)]
struct SectionArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Record name used in diagnostics
    #[arg(long, default_value = "sections")]
    key: String,

    /// Wrap every tier's value in its rarity colour
    #[arg(long)]
    colour: bool,
}

#[derive(Args)]
struct CombineArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Omit the affected subjects from each line
    #[arg(long)]
    skip_affected: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum TierMode {
    Wordwise,
    Incremental,
}

impl From<TierMode> for TierStrategy {
    fn from(mode: TierMode) -> Self {
        match mode {
            TierMode::Wordwise => Self::Wordwise,
            TierMode::Incremental => Self::Incremental,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let mut config = match &cli.config {
        Some(path) => MergeConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => MergeConfig::default(),
    };

    let lines = match cli.command {
        Commands::Fuzzy(args) => {
            if let Some(fraction) = args.fraction {
                config.max_replacement_fraction = fraction;
            }
            let engine = MergeEngine::new(config)?;
            let strings: Vec<String> = parse_input(&args.input)?;
            let merged = engine.merge(&strings);
            log::info!("merged {} strings into {}", strings.len(), merged.len());
            merged
        }
        Commands::Tiers(args) => {
            let engine = MergeEngine::new(config)?;
            let variants: BTreeMap<u32, String> = parse_input(&args.input)?;
            engine
                .merge_tiers(&args.key, &variants, args.strategy.into(), decorator(args.colour))
                .with_context(|| format!("Failed to merge tiers of {}", args.key))?
                .into_iter()
                .collect()
        }
        Commands::Sections(args) => {
            let engine = MergeEngine::new(config)?;
            let sections: Vec<TierSection> = parse_input(&args.input)?;
            engine
                .merge_sections(&args.key, &sections, decorator(args.colour))
                .with_context(|| format!("Failed to merge sections of {}", args.key))?
                .into_iter()
                .collect()
        }
        Commands::Combine(args) => {
            let engine = MergeEngine::new(config)?;
            let mut responses: Vec<StructuredResponse> = parse_input(&args.input)?;
            engine.combine(&mut responses);
            responses
                .iter()
                .map(|response| response.render(args.skip_affected))
                .filter(|line| !line.is_empty())
                .collect()
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&lines)?);
    } else {
        for line in lines {
            println!("{line}");
        }
    }
    Ok(())
}

fn decorator(colour: bool) -> &'static dyn VariantDecorator {
    if colour {
        &RarityColours
    } else {
        &Plain
    }
}

fn parse_input<T: serde::de::DeserializeOwned>(args: &InputArgs) -> Result<T> {
    let raw = read_input(args)?;
    serde_json::from_str(&raw).context("Input is not valid JSON for this command")
}

fn read_input(args: &InputArgs) -> Result<String> {
    if let Some(path) = &args.input {
        return fs::read_to_string(path)
            .with_context(|| format!("Failed to read JSON from {}", path.display()));
    }

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read JSON from stdin")?;

    if buffer.trim().is_empty() {
        anyhow::bail!("Input is empty. Provide --input or pipe JSON via stdin.");
    }

    Ok(buffer)
}
