//! Configuration settings for the cell culture simulation

use crate::game_of_life::{Grid, RuleKind, SeedSource, MAX_CELLS};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Smallest world that still has an interior
pub const MIN_WORLD_SIDE: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub world: WorldConfig,
    pub rules: RulesConfig,
    pub seed: SeedConfig,
    pub simulation: SimulationConfig,
    pub output: OutputConfig,
}

/// Dimensions of a randomized world; a seed file brings its own
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    pub width: usize,
    pub height: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RulesConfig {
    pub even: String,
    /// Empty means the even rule governs odd generations too
    #[serde(default)]
    pub odd: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Seed file; selects file seeding over randomization
    #[serde(default)]
    pub file: Option<PathBuf>,
    #[serde(default)]
    pub rng_seed: Option<u64>,
    pub fill_probability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub generations: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Print a snapshot every this many generations, 0 for final state only
    pub show_every: u64,
    #[serde(default)]
    pub final_state_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            world: WorldConfig {
                width: 32,
                height: 16,
            },
            rules: RulesConfig {
                even: RuleKind::Conway.name().to_string(),
                odd: String::new(),
            },
            seed: SeedConfig {
                file: None,
                rng_seed: None,
                fill_probability: 0.5,
            },
            simulation: SimulationConfig { generations: 50 },
            output: OutputConfig {
                format: OutputFormat::Text,
                show_every: 10,
                final_state_file: None,
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.rules.even.is_empty() {
            anyhow::bail!("An even generation rule is required");
        }

        if self.seed.file.is_none()
            && (self.world.width < MIN_WORLD_SIDE || self.world.height < MIN_WORLD_SIDE)
        {
            anyhow::bail!(
                "World must be at least {}x{}, got {}x{}",
                MIN_WORLD_SIDE,
                MIN_WORLD_SIDE,
                self.world.width,
                self.world.height
            );
        }

        if self.seed.file.is_none()
            && Grid::checked_len(self.world.width, self.world.height).is_none()
        {
            anyhow::bail!(
                "World of {}x{} exceeds the limit of {} cells",
                self.world.width,
                self.world.height,
                MAX_CELLS
            );
        }

        if !(0.0..=1.0).contains(&self.seed.fill_probability) {
            anyhow::bail!(
                "Fill probability must be within 0..=1, got {}",
                self.seed.fill_probability
            );
        }

        if let Some(ref file) = self.seed.file {
            if !file.exists() {
                anyhow::bail!("Seed file does not exist: {}", file.display());
            }
        }

        Ok(())
    }

    /// Seeding strategy these settings select
    pub fn seed_source(&self) -> SeedSource {
        match self.seed.file {
            Some(ref file) => SeedSource::File(file.clone()),
            None => SeedSource::Random {
                width: self.world.width,
                height: self.world.height,
                rng_seed: self.seed.rng_seed,
                fill_probability: self.seed.fill_probability,
            },
        }
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(ref seed_file) = cli_overrides.seed_file {
            self.seed.file = Some(seed_file.clone());
        }
        if let Some(width) = cli_overrides.width {
            self.world.width = width;
        }
        if let Some(height) = cli_overrides.height {
            self.world.height = height;
        }
        if let Some(generations) = cli_overrides.generations {
            self.simulation.generations = generations;
        }
        if let Some(ref even_rule) = cli_overrides.even_rule {
            self.rules.even = even_rule.clone();
        }
        if let Some(ref odd_rule) = cli_overrides.odd_rule {
            self.rules.odd = odd_rule.clone();
        }
        if let Some(rng_seed) = cli_overrides.rng_seed {
            self.seed.rng_seed = Some(rng_seed);
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
        if let Some(show_every) = cli_overrides.show_every {
            self.output.show_every = show_every;
        }
        if let Some(ref final_state) = cli_overrides.final_state_file {
            self.output.final_state_file = Some(final_state.clone());
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub seed_file: Option<PathBuf>,
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub generations: Option<u64>,
    pub even_rule: Option<String>,
    pub odd_rule: Option<String>,
    pub rng_seed: Option<u64>,
    pub format: Option<OutputFormat>,
    pub show_every: Option<u64>,
    pub final_state_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        settings.validate().unwrap();
        assert_eq!(settings.rules.even, "conway");
        assert!(settings.rules.odd.is_empty());
        assert!(matches!(
            settings.seed_source(),
            SeedSource::Random { width: 32, height: 16, .. }
        ));
    }

    #[test]
    fn test_yaml_round_trip() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config/default.yaml");

        let mut settings = Settings::default();
        settings.rules.odd = "von_neumann".to_string();
        settings.seed.rng_seed = Some(99);
        settings.to_file(&path).unwrap();

        assert_eq!(Settings::from_file(&path).unwrap(), settings);
    }

    #[test]
    fn test_optional_fields_may_be_omitted() {
        let yaml = r#"
world: { width: 10, height: 8 }
rules: { even: erik }
seed: { fill_probability: 0.25 }
simulation: { generations: 3 }
output: { format: json, show_every: 0 }
"#;
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.rules.odd, "");
        assert_eq!(settings.seed.file, None);
        assert_eq!(settings.output.format, OutputFormat::Json);
        settings.validate().unwrap();
    }

    #[test]
    fn test_validation_failures() {
        let mut settings = Settings::default();
        settings.world.width = 2;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.world.width = 2_000_000_000;
        settings.world.height = 2_000_000_000;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.seed.fill_probability = 1.5;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.rules.even.clear();
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.seed.file = Some(PathBuf::from("does/not/exist.txt"));
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let mut settings = Settings::default();
        settings.merge_with_cli(&CliOverrides {
            seed_file: Some(PathBuf::from("seeds/glider.txt")),
            generations: Some(7),
            odd_rule: Some("erik".to_string()),
            format: Some(OutputFormat::Json),
            ..CliOverrides::default()
        });

        assert_eq!(settings.simulation.generations, 7);
        assert_eq!(settings.rules.even, "conway");
        assert_eq!(settings.rules.odd, "erik");
        assert_eq!(settings.output.format, OutputFormat::Json);
        assert_eq!(
            settings.seed_source(),
            SeedSource::File(PathBuf::from("seeds/glider.txt"))
        );
    }
}
