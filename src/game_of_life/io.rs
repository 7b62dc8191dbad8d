//! Seed file loading and saving
//!
//! Format: a `WIDTHxHEIGHT` header line followed by HEIGHT rows of WIDTH
//! characters, `1` for alive and `0` for dead. Rows cover the whole world
//! rectangle, border included. Blank lines are skipped.

use super::{Grid, MAX_CELLS};
use anyhow::{Context, Result};
use std::path::Path;
use thiserror::Error;

/// Reasons a seed is rejected. A rejected seed never yields a partial grid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeedError {
    #[error("seed is empty")]
    Empty,

    #[error("line {line}: expected a WIDTHxHEIGHT header, found '{found}'")]
    InvalidHeader { line: usize, found: String },

    #[error("world dimensions {width}x{height} must both be positive")]
    ZeroDimension { width: usize, height: usize },

    #[error("world dimensions {width}x{height} exceed the limit of {} cells", MAX_CELLS)]
    TooLarge { width: usize, height: usize },

    #[error("expected {expected} rows, found {found}")]
    RowCount { expected: usize, found: usize },

    #[error("line {line}: row has length {found}, expected {expected}")]
    RowLength {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}, column {column}: invalid character '{found}', only '0' and '1' are allowed")]
    InvalidCharacter {
        line: usize,
        column: usize,
        found: char,
    },
}

/// Load a seed grid from a file
pub fn load_grid_from_file<P: AsRef<Path>>(path: P) -> Result<Grid> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read seed file: {}", path.as_ref().display()))?;

    let grid = parse_seed(&content)
        .with_context(|| format!("Failed to parse seed file: {}", path.as_ref().display()))?;
    Ok(grid)
}

/// Parse a seed from its text form
pub fn parse_seed(content: &str) -> Result<Grid, SeedError> {
    // (1-based line number, trimmed content)
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let (header_line, header) = lines.next().ok_or(SeedError::Empty)?;
    let (width, height) = parse_header(header).ok_or_else(|| SeedError::InvalidHeader {
        line: header_line,
        found: header.to_string(),
    })?;
    if width == 0 || height == 0 {
        return Err(SeedError::ZeroDimension { width, height });
    }
    if Grid::checked_len(width, height).is_none() {
        return Err(SeedError::TooLarge { width, height });
    }

    let mut rows = Vec::new();
    for (line, text) in lines {
        if rows.len() == height {
            return Err(SeedError::RowCount {
                expected: height,
                found: height + 1,
            });
        }

        let found = text.chars().count();
        if found != width {
            return Err(SeedError::RowLength {
                line,
                expected: width,
                found,
            });
        }

        let row = text
            .chars()
            .enumerate()
            .map(|(column, ch)| match ch {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(SeedError::InvalidCharacter {
                    line,
                    column,
                    found: ch,
                }),
            })
            .collect::<Result<Vec<bool>, _>>()?;
        rows.push(row);
    }

    if rows.len() != height {
        return Err(SeedError::RowCount {
            expected: height,
            found: rows.len(),
        });
    }

    Grid::from_rows(rows).map_err(|_| SeedError::TooLarge { width, height })
}

fn parse_header(header: &str) -> Option<(usize, usize)> {
    let (width, height) = header.split_once(|c| c == 'x' || c == 'X')?;
    Some((width.trim().parse().ok()?, height.trim().parse().ok()?))
}

/// Save a grid to a seed file
pub fn save_grid_to_file<P: AsRef<Path>>(grid: &Grid, path: P) -> Result<()> {
    let content = grid_to_seed(grid);

    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write seed file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Text form of a grid, header included
pub fn grid_to_seed(grid: &Grid) -> String {
    let mut result = String::with_capacity(16 + grid.height() * (grid.width() + 1));
    result.push_str(&format!("{}x{}\n", grid.width(), grid.height()));

    for row in grid.cells().chunks(grid.width()) {
        result.extend(row.iter().map(|cell| if cell.is_alive() { '1' } else { '0' }));
        result.push('\n');
    }

    result
}

/// Write the bundled example seeds into `output_dir`
pub fn create_example_seeds<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    for (name, content) in EXAMPLE_SEEDS {
        std::fs::write(dir.join(format!("{name}.txt")), content)
            .with_context(|| format!("Failed to write {name}.txt"))?;
    }

    Ok(())
}

const EXAMPLE_SEEDS: [(&str, &str); 4] = [
    (
        "glider",
        "8x8\n00000000\n00100000\n00010000\n01110000\n00000000\n00000000\n00000000\n00000000\n",
    ),
    ("blinker", "5x5\n00000\n00000\n01110\n00000\n00000\n"),
    ("block", "4x4\n0000\n0110\n0110\n0000\n"),
    ("beacon", "6x6\n000000\n011000\n011000\n000110\n000110\n000000\n"),
];
