//! Command line driver for the staged Game of Life

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use staged_life::{
    config::{CliOverrides, OutputFormat, Settings},
    game_of_life::{create_example_seeds, save_grid_to_file, Population, RuleKind},
    run_simulation,
    utils::{ColorOutput, GenerationFormatter},
    Simulation,
};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "staged_life")]
#[command(about = "Game of Life with per-parity rules of existence")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Seed file (overrides config, replaces randomization)
        #[arg(short, long)]
        seed_file: Option<PathBuf>,

        /// World width for random seeding (overrides config)
        #[arg(long)]
        width: Option<usize>,

        /// World height for random seeding (overrides config)
        #[arg(long)]
        height: Option<usize>,

        /// Number of generations (overrides config)
        #[arg(short, long)]
        generations: Option<u64>,

        /// Rule for even generations (overrides config)
        #[arg(short, long)]
        even_rule: Option<String>,

        /// Rule for odd generations (overrides config)
        #[arg(short, long)]
        odd_rule: Option<String>,

        /// Seed for the randomizer (overrides config)
        #[arg(long)]
        rng_seed: Option<u64>,

        /// Output format (overrides config)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Print every N generations, 0 for the final state only (overrides config)
        #[arg(long)]
        show_every: Option<u64>,

        /// Write the final generation to this seed file (overrides config)
        #[arg(long)]
        final_state: Option<PathBuf>,
    },

    /// Create example configuration and seed files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// List the available rules of existence
    Rules,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            seed_file,
            width,
            height,
            generations,
            even_rule,
            odd_rule,
            rng_seed,
            format,
            show_every,
            final_state,
        } => {
            let overrides = CliOverrides {
                seed_file,
                width,
                height,
                generations,
                even_rule,
                odd_rule,
                rng_seed,
                format,
                show_every,
                final_state_file: final_state,
            };
            run_command(config, &overrides)
        }
        Commands::Setup { directory, force } => setup_command(directory, force),
        Commands::Rules => {
            rules_command();
            Ok(())
        }
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_settings(config_path: &PathBuf) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        warn!(path = %config_path.display(), "config file not found, using defaults");
        Ok(Settings::default())
    }
}

fn run_command(config_path: PathBuf, overrides: &CliOverrides) -> Result<()> {
    let mut settings = load_settings(&config_path)?;
    settings.merge_with_cli(overrides);
    settings
        .validate()
        .context("Configuration validation failed")?;

    let format = settings.output.format;
    let show_every = settings.output.show_every;
    if format == OutputFormat::Text {
        println!("{}", ColorOutput::info("Starting simulation"));
    }

    let start_time = Instant::now();
    let Simulation {
        population,
        registry,
    } = run_simulation(&settings, |population, registry| {
        if show_every > 0 && population.generation() % show_every == 0 {
            print_generation(population, format, population.tracks_elders(registry)?)?;
        }
        Ok(())
    })?;
    info!(
        generations = settings.simulation.generations,
        elapsed = ?start_time.elapsed(),
        "simulation finished"
    );

    let already_shown = show_every > 0 && population.generation() % show_every == 0;
    if !already_shown {
        print_generation(&population, format, population.tracks_elders(&registry)?)?;
    }

    if format == OutputFormat::Text {
        let even = registry.get(population.even_rule())?.name();
        let odd = registry.get(population.odd_rule())?.name();
        println!(
            "{}",
            ColorOutput::success(&GenerationFormatter::format_summary(&population, (even, odd)))
        );
    }

    if let Some(ref path) = settings.output.final_state_file {
        save_grid_to_file(population.grid(), path)
            .context("Failed to save final generation")?;
        if format == OutputFormat::Text {
            println!("Final generation saved to {}", path.display());
        }
    }

    Ok(())
}

fn print_generation(population: &Population, format: OutputFormat, track_elders: bool) -> Result<()> {
    println!(
        "{}",
        GenerationFormatter::format_generation(population, format, track_elders)?
    );
    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let seed_dir = directory.join("seeds");

    for dir in [&config_dir, &seed_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!(
            "{}",
            ColorOutput::warning(&format!("Skipped: {} (already exists)", config_path.display()))
        );
    }

    create_example_seeds(&seed_dir).context("Failed to create example seeds")?;
    println!("Created example seeds in: {}", seed_dir.display());

    // Alternating rules over a seeded glider
    let mut alternating = Settings::default();
    alternating.rules.odd = RuleKind::VonNeumann.name().to_string();
    alternating.seed.file = Some(PathBuf::from("seeds/glider.txt"));
    alternating.to_file(&config_dir.join("alternating.yaml"))?;

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Run: cargo run -- run --config config/default.yaml");

    Ok(())
}

fn rules_command() {
    println!("Available rules of existence:");
    for kind in RuleKind::ALL {
        let limits = kind.limits();
        println!(
            "  {:<12} survive {}..={}, birth at {}, {:?} neighborhood",
            kind.name(),
            limits.underpopulation,
            limits.overpopulation,
            limits.resurrection,
            kind.neighborhood()
        );
    }
}
