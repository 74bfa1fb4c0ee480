//! Per-cell desirability grids used by the heatmap strategies.
//!
//! Heatmaps come from two text encodings:
//!
//! - **Digit text**: one line per column (X), one digit per row (Y), so line
//!   `x` character `y` is the weight of cell `(x, y)`
//! - **CSV**: the same layout with comma-separated integers, which allows
//!   negative or multi-digit weights
//!
//! Either way the result is a plain [`Heatmap`] and the strategies never see
//! the source format.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tetros_engine::{BoardSize, Position};

/// Errors raised while loading or validating a heatmap.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum HeatmapError {
    #[display("failed to read heatmap {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[display("line {line}, column {column}: {value:?} is not a valid weight")]
    InvalidCell {
        line: usize,
        column: usize,
        value: String,
    },
    #[display("line {line} has {found} cells, expected {expected}")]
    RaggedLine {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[display("heatmap has no cells")]
    Empty,
    #[display("heatmap is {found} but the board is {expected}")]
    DimensionMismatch { expected: BoardSize, found: BoardSize },
    #[display("a heatmap schedule needs at least one stage")]
    EmptySchedule,
}

/// A W×H grid of integer weights.
///
/// # Example
///
/// ```
/// use tetros_engine::{BoardSize, Position};
/// use tetros_evaluator::heatmap::Heatmap;
///
/// let mut heatmap = Heatmap::parse_digits("123\n456\n").unwrap();
/// assert_eq!(heatmap.size(), BoardSize::new(2, 3));
/// assert_eq!(heatmap.get(Position::new(1, 0)), Some(4));
///
/// heatmap.increment(-1);
/// heatmap.multiply(2);
/// assert_eq!(heatmap.min_max(), (0, 10));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heatmap {
    size: BoardSize,
    weights: Vec<i32>,
}

impl Heatmap {
    /// Creates a heatmap with every cell set to `weight`.
    #[must_use]
    pub fn filled(size: BoardSize, weight: i32) -> Self {
        Self {
            size,
            weights: vec![weight; size.area()],
        }
    }

    /// Builds a heatmap from columns, where `columns[x][y]` is the weight of `(x, y)`.
    pub fn from_columns(columns: Vec<Vec<i32>>) -> Result<Self, HeatmapError> {
        let width = columns.len();
        let height = columns.first().map_or(0, Vec::len);
        if height == 0 {
            return Err(HeatmapError::Empty);
        }
        let size = BoardSize::new(width, height);
        let mut heatmap = Self::filled(size, 0);
        for (x, column) in columns.into_iter().enumerate() {
            if column.len() != height {
                return Err(HeatmapError::RaggedLine {
                    line: x + 1,
                    expected: height,
                    found: column.len(),
                });
            }
            for (y, weight) in column.into_iter().enumerate() {
                heatmap.weights[y * width + x] = weight;
            }
        }
        Ok(heatmap)
    }

    /// Parses the digit-text encoding: one line per column, one `0`-`9` digit per cell.
    ///
    /// Trailing blank lines are ignored.
    pub fn parse_digits(text: &str) -> Result<Self, HeatmapError> {
        let columns = content_lines(text)
            .enumerate()
            .map(|(i, line)| {
                line.chars()
                    .enumerate()
                    .map(|(j, ch)| {
                        ch.to_digit(10)
                            .and_then(|d| i32::try_from(d).ok())
                            .ok_or_else(|| HeatmapError::InvalidCell {
                                line: i + 1,
                                column: j + 1,
                                value: ch.to_string(),
                            })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_columns(columns)
    }

    /// Parses the CSV encoding: one line per column, comma-separated integers.
    pub fn parse_csv(text: &str) -> Result<Self, HeatmapError> {
        let columns = content_lines(text)
            .enumerate()
            .map(|(i, line)| {
                line.split(',')
                    .enumerate()
                    .map(|(j, field)| {
                        let field = field.trim();
                        field.parse().map_err(|_| HeatmapError::InvalidCell {
                            line: i + 1,
                            column: j + 1,
                            value: field.to_owned(),
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_columns(columns)
    }

    /// Reads a heatmap file, picking the CSV parser for `.csv` files and the digit parser otherwise.
    pub fn load<P>(path: P) -> Result<Self, HeatmapError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| HeatmapError::Io {
            path: path.to_owned(),
            source,
        })?;
        let is_csv = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv {
            Self::parse_csv(&text)
        } else {
            Self::parse_digits(&text)
        }
    }

    /// Fails unless the heatmap covers exactly a board of `size`.
    pub fn check_size(&self, size: BoardSize) -> Result<(), HeatmapError> {
        if self.size == size {
            Ok(())
        } else {
            Err(HeatmapError::DimensionMismatch {
                expected: size,
                found: self.size,
            })
        }
    }

    #[must_use]
    pub fn size(&self) -> BoardSize {
        self.size
    }

    fn index(&self, pos: Position) -> Option<usize> {
        let x = usize::try_from(pos.x).ok()?;
        let y = usize::try_from(pos.y).ok()?;
        (x < self.size.width && y < self.size.height).then_some(y * self.size.width + x)
    }

    #[must_use]
    pub fn get(&self, pos: Position) -> Option<i32> {
        self.index(pos).map(|i| self.weights[i])
    }

    /// Sets the weight at `pos`. Positions outside the grid are ignored.
    pub fn set(&mut self, pos: Position, weight: i32) {
        if let Some(i) = self.index(pos) {
            self.weights[i] = weight;
        }
    }

    /// Adds `amount` to the weight at `pos`. Positions outside the grid are ignored.
    pub fn add(&mut self, pos: Position, amount: i32) {
        if let Some(i) = self.index(pos) {
            self.weights[i] = self.weights[i].saturating_add(amount);
        }
    }

    /// Smallest and largest weight.
    #[must_use]
    pub fn min_max(&self) -> (i32, i32) {
        self.weights
            .iter()
            .fold(None, |acc: Option<(i32, i32)>, &w| match acc {
                Some((min, max)) => Some((min.min(w), max.max(w))),
                None => Some((w, w)),
            })
            .unwrap_or((0, 0))
    }

    /// Adds `amount` to every cell.
    pub fn increment(&mut self, amount: i32) {
        for weight in &mut self.weights {
            *weight = weight.saturating_add(amount);
        }
    }

    /// Multiplies every cell by `factor`.
    pub fn multiply(&mut self, factor: i32) {
        for weight in &mut self.weights {
            *weight = weight.saturating_mul(factor);
        }
    }

    /// Sum of the weights of `cells`. Cells outside the grid contribute nothing.
    pub fn score<I>(&self, cells: I) -> i32
    where
        I: IntoIterator<Item = Position>,
    {
        cells
            .into_iter()
            .filter_map(|pos| self.get(pos))
            .fold(0, i32::saturating_add)
    }
}

/// Lines of `text` without the trailing blank ones.
fn content_lines(text: &str) -> impl Iterator<Item = &str> {
    let lines: Vec<&str> = text.lines().collect();
    let end = lines
        .iter()
        .rposition(|line| !line.trim().is_empty())
        .map_or(0, |i| i + 1);
    lines.into_iter().take(end)
}
