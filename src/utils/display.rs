//! Display and output formatting utilities

use crate::config::OutputFormat;
use crate::game_of_life::{Grid, Maturity, Point, Population};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Serializable view of one generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationSnapshot {
    pub generation: u64,
    pub width: usize,
    pub height: usize,
    pub living_cells: usize,
    pub alive: Vec<Point>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prime_elder: Option<Point>,
}

impl GenerationSnapshot {
    /// Capture the population's current generation
    pub fn capture(population: &Population, track_elders: bool) -> Self {
        let grid = population.grid();
        Self {
            generation: population.generation(),
            width: grid.width(),
            height: grid.height(),
            living_cells: grid.living_count(),
            alive: grid.living_cells(),
            prime_elder: if track_elders {
                population.prime_elder()
            } else {
                None
            },
        }
    }
}

/// Format generations for console output
pub struct GenerationFormatter;

impl GenerationFormatter {
    /// Render a generation in the requested format
    pub fn format_generation(
        population: &Population,
        format: OutputFormat,
        track_elders: bool,
    ) -> Result<String> {
        match format {
            OutputFormat::Text => {
                let mut output = format!(
                    "Generation {} (living: {}/{})\n",
                    population.generation(),
                    population.living_cell_count(),
                    population.total_cell_population()
                );
                if track_elders {
                    output.push_str(&Self::format_grid_with_ages(population));
                } else {
                    output.push_str(&Self::format_grid_compact(population.grid()));
                }
                Ok(output)
            }
            OutputFormat::Json => {
                let snapshot = GenerationSnapshot::capture(population, track_elders);
                serde_json::to_string(&snapshot).context("Failed to serialize snapshot")
            }
        }
    }

    /// Format a grid in compact form
    pub fn format_grid_compact(grid: &Grid) -> String {
        let mut output = String::with_capacity(grid.len() * 3 + grid.height());
        for row in grid.cells().chunks(grid.width()) {
            output.extend(row.iter().map(|cell| if cell.is_alive() { '█' } else { '·' }));
            output.push('\n');
        }
        output
    }

    /// Compact form with living cells drawn by age: `o` old, `E` elder,
    /// `P` the prime elder
    pub fn format_grid_with_ages(population: &Population) -> String {
        let grid = population.grid();
        let prime_elder = population.prime_elder();
        let mut output = String::with_capacity(grid.len() * 3 + grid.height());

        for (index, cell) in grid.cells().iter().enumerate() {
            let glyph = match cell.maturity() {
                None => '·',
                Some(_) if prime_elder == Some(grid.point_at(index)) => 'P',
                Some(Maturity::Elder) => 'E',
                Some(Maturity::Old) => 'o',
                Some(Maturity::Young) => '█',
            };
            output.push(glyph);
            if (index + 1) % grid.width() == 0 {
                output.push('\n');
            }
        }
        output
    }

    /// Format a grid with coordinates
    pub fn format_grid_with_coords(grid: &Grid) -> String {
        let mut output = String::new();

        output.push_str("   ");
        for x in 0..grid.width() {
            output.push_str(&format!("{:2}", x % 10));
        }
        output.push('\n');

        for (y, row) in grid.cells().chunks(grid.width()).enumerate() {
            output.push_str(&format!("{:2} ", y));
            for cell in row {
                output.push_str(if cell.is_alive() { "██" } else { "··" });
            }
            output.push('\n');
        }

        output
    }

    /// One-line summary after a run
    pub fn format_summary(population: &Population, rule_names: (&str, &str)) -> String {
        let (even, odd) = rule_names;
        let total = population.total_cell_population();
        let living = population.living_cell_count();
        let density = if total == 0 {
            0.0
        } else {
            living as f64 / total as f64 * 100.0
        };

        format!(
            "Generation {} | rules even={} odd={} | living {}/{} ({:.1}%)",
            population.generation(),
            even,
            odd,
            living,
            total,
            density
        )
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    fn colored(text: &str, code: u8) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", code, text)
        } else {
            text.to_string()
        }
    }

    /// Colors are off under `NO_COLOR` or a dumb terminal
    fn supports_color() -> bool {
        std::env::var_os("NO_COLOR").is_none()
            && std::env::var("TERM").map_or(true, |term| term != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, 32)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, 31)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, 33)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, 34)
    }
}
