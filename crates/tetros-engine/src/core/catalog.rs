use crate::EmptyPieceError;

use super::{color::Color, piece::Piece};

/// Name and offsets of one shape in the standard set, before any owner is assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeDef {
    pub name: &'static str,
    pub cells: &'static [(i32, i32)],
}

/// The 21 shapes every player starts with, from the monomino up to the pentominoes.
pub const STANDARD_SHAPES: [ShapeDef; 21] = [
    ShapeDef { name: "1", cells: &[(0, 0)] },
    ShapeDef { name: "2", cells: &[(0, 0), (0, 1)] },
    ShapeDef { name: "3I", cells: &[(0, 0), (0, 1), (0, 2)] },
    ShapeDef { name: "3L", cells: &[(0, 0), (0, 1), (1, 1)] },
    ShapeDef { name: "4I", cells: &[(0, 0), (0, 1), (0, 2), (0, 3)] },
    ShapeDef { name: "4l", cells: &[(0, 0), (0, 1), (0, 2), (1, 2)] },
    ShapeDef { name: "4T", cells: &[(0, 0), (1, 0), (1, 1), (2, 0)] },
    ShapeDef { name: "4O", cells: &[(0, 0), (0, 1), (1, 0), (1, 1)] },
    ShapeDef { name: "4Z", cells: &[(0, 0), (1, 0), (1, 1), (2, 1)] },
    ShapeDef { name: "5I", cells: &[(0, 0), (0, 1), (0, 2), (0, 3), (0, 4)] },
    ShapeDef { name: "5l", cells: &[(0, 0), (0, 1), (0, 2), (0, 3), (1, 3)] },
    ShapeDef { name: "5Z", cells: &[(0, 0), (1, 0), (1, 1), (2, 1), (3, 1)] },
    ShapeDef { name: "5b", cells: &[(0, 0), (0, 1), (0, 2), (1, 1), (1, 2)] },
    ShapeDef { name: "5C", cells: &[(0, 0), (0, 1), (0, 2), (1, 0), (1, 2)] },
    ShapeDef { name: "5r", cells: &[(0, 0), (0, 1), (0, 2), (0, 3), (1, 1)] },
    ShapeDef { name: "5T", cells: &[(0, 0), (1, 0), (1, 1), (1, 2), (2, 0)] },
    ShapeDef { name: "5L", cells: &[(0, 0), (0, 1), (0, 2), (1, 2), (2, 2)] },
    ShapeDef { name: "5¬", cells: &[(0, 0), (0, 1), (1, 1), (1, 2), (2, 2)] },
    ShapeDef { name: "5S", cells: &[(0, 0), (0, 1), (1, 1), (2, 1), (2, 2)] },
    ShapeDef { name: "5#", cells: &[(0, 0), (0, 1), (1, 1), (1, 2), (2, 1)] },
    ShapeDef { name: "5+", cells: &[(0, 0), (-1, 1), (0, 1), (1, 1), (0, 2)] },
];

/// Name of the single-cell piece, which earns a bonus when played last.
pub const MONOMINO_NAME: &str = "1";

/// The set of shapes dealt to each player at the start of a game.
///
/// Shapes are kept in catalog order; [`hand`](Self::hand) hands out fresh
/// copies so players never share piece state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceCatalog {
    shapes: Vec<(String, Vec<(i32, i32)>)>,
}

impl PieceCatalog {
    /// Builds a catalog from arbitrary shapes, rejecting any shape without cells.
    pub fn new<I, S>(shapes: I) -> Result<Self, EmptyPieceError>
    where
        I: IntoIterator<Item = (S, Vec<(i32, i32)>)>,
        S: Into<String>,
    {
        let shapes = shapes
            .into_iter()
            .map(|(name, cells)| {
                let name = name.into();
                if cells.is_empty() {
                    Err(EmptyPieceError { name })
                } else {
                    Ok((name, cells))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { shapes })
    }

    #[must_use]
    pub fn standard() -> Self {
        Self {
            shapes: STANDARD_SHAPES
                .iter()
                .map(|def| (def.name.to_owned(), def.cells.to_vec()))
                .collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Total number of cells over all shapes.
    #[must_use]
    pub fn total_cells(&self) -> usize {
        self.shapes.iter().map(|(_, cells)| cells.len()).sum()
    }

    /// Creates one piece per shape, owned by `color`.
    #[must_use]
    pub fn hand(&self, color: Color) -> Vec<Piece> {
        self.shapes
            .iter()
            .map(|(name, cells)| Piece::from_parts(name.clone(), color, cells.clone()))
            .collect()
    }
}

impl Default for PieceCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_standard_catalog() {
        let catalog = PieceCatalog::standard();
        assert_eq!(catalog.len(), 21);
        assert_eq!(catalog.total_cells(), 89);

        let hand = catalog.hand(Color::Red);
        assert_eq!(hand[0].name(), MONOMINO_NAME);
        assert_eq!(hand[0].size(), 1);
        assert!(hand.iter().all(|piece| piece.color() == Color::Red));
        assert!(hand.iter().all(|piece| (1..=5).contains(&piece.size())));

        let names: HashSet<_> = hand.iter().map(Piece::name).collect();
        assert_eq!(names.len(), 21, "piece names must be unique");
    }

    #[test]
    fn test_standard_shapes_are_distinct() {
        // Normalise every orientation so that equal shapes compare equal.
        let canonical = |piece: &Piece| {
            piece
                .orientations()
                .iter()
                .map(|p| {
                    let (min, _) = p.bounds();
                    let mut cells: Vec<_> =
                        p.cells().iter().map(|(x, y)| (x - min.x, y - min.y)).collect();
                    cells.sort_unstable();
                    cells
                })
                .min()
                .unwrap()
        };
        let hand = PieceCatalog::standard().hand(Color::Blue);
        let shapes: HashSet<_> = hand.iter().map(canonical).collect();
        assert_eq!(shapes.len(), hand.len());
    }

    #[test]
    fn test_custom_catalog_rejects_empty_shape() {
        let err = PieceCatalog::new([("ok", vec![(0, 0)]), ("bad", vec![])]).unwrap_err();
        assert_eq!(err.name, "bad");

        let catalog = PieceCatalog::new([("dot", vec![(0, 0)])]).unwrap();
        assert_eq!(catalog.hand(Color::Cyan).len(), 1);
    }
}
