use rand::{Rng, seq::SliceRandom as _};

use crate::{GameSetupError, engine::PlayerState};

use super::{
    color::{Color, ColorSet},
    piece::Piece,
    position::{BoardSize, Position},
};

/// One square of the board.
///
/// An occupied cell never lists any anchor colors.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    occupant: Option<Color>,
    anchor_for: ColorSet,
}

impl Cell {
    #[must_use]
    pub fn occupant(&self) -> Option<Color> {
        self.occupant
    }

    /// Colors that may currently cover this cell as part of a new piece.
    #[must_use]
    pub fn anchor_for(&self) -> ColorSet {
        self.anchor_for
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }
}

/// The game board and every placement rule.
///
/// Cells are stored row-major. Anchor sets are only rebuilt by
/// [`recompute_anchors`](Self::recompute_anchors); [`place`](Self::place)
/// clears the sets of the cells it covers but leaves the rest stale until the
/// next rebuild.
///
/// All queries accept any coordinate. Positions outside the grid are simply
/// treated as unavailable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: BoardSize,
    cells: Vec<Cell>,
    starting_positions: Vec<(Color, Position)>,
}

impl Board {
    /// Creates an empty board for `colors`.
    ///
    /// Starting positions default to the four corners. Whichever list is used
    /// is shuffled with `rng` before being handed out in `colors` order, so
    /// seat assignment is random but reproducible from the seed.
    pub fn new<R>(
        size: BoardSize,
        colors: &[Color],
        starting_positions: Option<&[Position]>,
        rng: &mut R,
    ) -> Result<Self, GameSetupError>
    where
        R: Rng + ?Sized,
    {
        let mut positions = match starting_positions {
            Some(positions) => positions.to_vec(),
            None => size.corners().to_vec(),
        };
        if colors.is_empty() {
            return Err(GameSetupError::NoPlayers);
        }
        if positions.len() < colors.len() {
            return Err(GameSetupError::NotEnoughStartingPositions {
                players: colors.len(),
                positions: positions.len(),
            });
        }
        positions.shuffle(rng);
        let assigned: Vec<_> = colors.iter().copied().zip(positions).collect();
        Self::with_starting_positions(size, &assigned)
    }

    /// Creates an empty board with a fixed starting cell per color.
    pub fn with_starting_positions(
        size: BoardSize,
        starting_positions: &[(Color, Position)],
    ) -> Result<Self, GameSetupError> {
        if size.width == 0 || size.height == 0 {
            return Err(GameSetupError::EmptyBoard {
                width: size.width,
                height: size.height,
            });
        }
        if starting_positions.is_empty() {
            return Err(GameSetupError::NoPlayers);
        }

        let mut seen = ColorSet::EMPTY;
        for &(color, position) in starting_positions {
            if seen.contains(color) {
                return Err(GameSetupError::DuplicateColor(color));
            }
            seen.insert(color);
            if !size_contains(size, position) {
                return Err(GameSetupError::StartingPositionOutOfBounds {
                    position,
                    width: size.width,
                    height: size.height,
                });
            }
        }

        let mut board = Self {
            size,
            cells: vec![Cell::default(); size.area()],
            starting_positions: starting_positions.to_vec(),
        };
        board.recompute_anchors();
        Ok(board)
    }

    #[must_use]
    pub fn size(&self) -> BoardSize {
        self.size
    }

    /// Active colors with their starting cells.
    #[must_use]
    pub fn starting_positions(&self) -> &[(Color, Position)] {
        &self.starting_positions
    }

    #[must_use]
    pub fn starting_position(&self, color: Color) -> Option<Position> {
        self.starting_positions
            .iter()
            .find(|(c, _)| *c == color)
            .map(|(_, pos)| *pos)
    }

    pub fn colors(&self) -> impl Iterator<Item = Color> + '_ {
        self.starting_positions.iter().map(|(color, _)| *color)
    }

    #[must_use]
    pub fn in_bounds(&self, pos: Position) -> bool {
        size_contains(self.size, pos)
    }

    fn index(&self, pos: Position) -> Option<usize> {
        let x = usize::try_from(pos.x).ok()?;
        let y = usize::try_from(pos.y).ok()?;
        (x < self.size.width && y < self.size.height).then_some(y * self.size.width + x)
    }

    #[must_use]
    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        self.index(pos).map(|i| &self.cells[i])
    }

    #[must_use]
    pub fn occupant(&self, pos: Position) -> Option<Color> {
        self.cell(pos).and_then(Cell::occupant)
    }

    #[must_use]
    pub fn is_empty_at(&self, pos: Position) -> bool {
        self.cell(pos).is_some_and(Cell::is_empty)
    }

    #[must_use]
    pub fn is_anchor_for(&self, pos: Position, color: Color) -> bool {
        self.cell(pos).is_some_and(|cell| cell.anchor_for.contains(color))
    }

    /// Returns true if any edge-sharing neighbor of `pos` holds `color`.
    #[must_use]
    pub fn touches_orthogonally(&self, pos: Position, color: Color) -> bool {
        pos.orthogonal_neighbors()
            .any(|n| self.occupant(n) == Some(color))
    }

    /// Returns true if any corner-sharing neighbor of `pos` holds `color`.
    #[must_use]
    pub fn touches_diagonally(&self, pos: Position, color: Color) -> bool {
        pos.diagonal_neighbors()
            .any(|n| self.occupant(n) == Some(color))
    }

    /// Checks whether `piece` can be placed with its origin at `anchor`.
    ///
    /// Every covered cell must be on the board, empty and not edge-adjacent to
    /// the piece's own color, and at least one covered cell must be a legal
    /// anchor for that color.
    #[must_use]
    pub fn fits(&self, anchor: Position, piece: &Piece) -> bool {
        let color = piece.color();
        let mut anchored = false;
        for pos in piece.absolute_cells(anchor) {
            let Some(cell) = self.cell(pos) else {
                return false;
            };
            if !cell.is_empty() || self.touches_orthogonally(pos, color) {
                return false;
            }
            anchored |= cell.anchor_for.contains(color);
        }
        anchored
    }

    /// Writes `piece` onto the board if it [`fits`](Self::fits).
    ///
    /// Returns `false` and leaves the board untouched otherwise. Only the
    /// covered cells change; call [`recompute_anchors`](Self::recompute_anchors)
    /// afterwards to refresh the neighborhood.
    pub fn place(&mut self, anchor: Position, piece: &Piece) -> bool {
        if !self.fits(anchor, piece) {
            return false;
        }
        for pos in piece.absolute_cells(anchor) {
            if let Some(i) = self.index(pos) {
                self.cells[i] = Cell {
                    occupant: Some(piece.color()),
                    anchor_for: ColorSet::EMPTY,
                };
            }
        }
        true
    }

    /// Rebuilds the anchor set of every cell from the current occupancy.
    ///
    /// A color anchors an empty cell when the cell touches that color
    /// diagonally but not orthogonally, or when it is the color's starting
    /// cell and the color has no cells on the board yet.
    pub fn recompute_anchors(&mut self) {
        let placed: ColorSet = self.cells.iter().filter_map(Cell::occupant).collect();
        let mut anchors = Vec::with_capacity(self.cells.len());
        for pos in self.positions() {
            let mut set = ColorSet::EMPTY;
            if self.is_empty_at(pos) {
                for &(color, start) in &self.starting_positions {
                    let opens_game = !placed.contains(color) && start == pos;
                    let touches_corner = self.touches_diagonally(pos, color)
                        && !self.touches_orthogonally(pos, color);
                    if opens_game || touches_corner {
                        set.insert(color);
                    }
                }
            }
            anchors.push(set);
        }
        for (cell, set) in self.cells.iter_mut().zip(anchors) {
            cell.anchor_for = set;
        }
    }

    /// All cells currently anchoring `color`, in row-major order.
    #[must_use]
    pub fn legal_anchors(&self, color: Color) -> Vec<Position> {
        self.positions()
            .filter(|pos| self.is_anchor_for(*pos, color))
            .collect()
    }

    #[must_use]
    pub fn has_anchor(&self, color: Color) -> bool {
        self.cells.iter().any(|cell| cell.anchor_for.contains(color))
    }

    /// Returns true when no listed player can act: each one has knocked or has
    /// no anchor left.
    pub fn is_stalemate<'a, I>(&self, players: I) -> bool
    where
        I: IntoIterator<Item = &'a PlayerState>,
    {
        players
            .into_iter()
            .all(|player| player.is_knocked() || !self.has_anchor(player.color()))
    }

    /// Inclusive `(min, max)` corners of the cells held by `color`, if any.
    #[must_use]
    pub fn bounding_box(&self, color: Color) -> Option<(Position, Position)> {
        let mut cells = self
            .positions()
            .filter(|pos| self.occupant(*pos) == Some(color));
        let first = cells.next()?;
        Some(cells.fold((first, first), |(min, max), pos| {
            (
                Position::new(min.x.min(pos.x), min.y.min(pos.y)),
                Position::new(max.x.max(pos.x), max.y.max(pos.y)),
            )
        }))
    }

    /// Counts occupied cells (any color) with `min <= pos < end` on both axes.
    #[must_use]
    pub fn occupied_in(&self, min: Position, end: Position) -> usize {
        let mut count = 0;
        for y in min.y..end.y {
            for x in min.x..end.x {
                if self.occupant(Position::new(x, y)).is_some() {
                    count += 1;
                }
            }
        }
        count
    }

    #[must_use]
    pub fn occupied_count(&self, color: Color) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.occupant == Some(color))
            .count()
    }

    /// Every board coordinate in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let width = to_coord(self.size.width);
        let height = to_coord(self.size.height);
        (0..height).flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
    }

    /// Builds a board from rows of color letters (see [`Color::as_char`]) and `.` for empty cells.
    ///
    /// Whitespace is ignored and blank lines are skipped. Anchors are
    /// recomputed for the given starting positions.
    ///
    /// # Panics
    ///
    /// Panics on ragged rows or unknown characters. Meant for tests and fixtures.
    #[must_use]
    pub fn from_ascii(art: &str, starting_positions: &[(Color, Position)]) -> Self {
        let rows: Vec<Vec<char>> = art
            .lines()
            .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .filter(|row| !row.is_empty())
            .collect();
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);

        let mut board = Self::with_starting_positions(BoardSize::new(width, height), starting_positions)
            .unwrap_or_else(|e| panic!("invalid board fixture: {e}"));
        for (y, row) in rows.iter().enumerate() {
            assert_eq!(
                row.len(),
                width,
                "Each row must have exactly {width} cells, got {} at row {y}",
                row.len()
            );
            for (x, &ch) in row.iter().enumerate() {
                let occupant = match ch {
                    '.' => None,
                    _ => Some(
                        Color::from_char(ch)
                            .unwrap_or_else(|| panic!("unknown cell {ch:?} at ({x}, {y})")),
                    ),
                };
                board.cells[y * width + x].occupant = occupant;
            }
        }
        board.recompute_anchors();
        board
    }

    /// Dumps the occupancy as one line per row, one character per cell.
    #[must_use]
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.size.height);
        for row in self.cells.chunks(self.size.width) {
            for cell in row {
                out.push(cell.occupant.map_or('.', Color::as_char));
            }
            out.push('\n');
        }
        out
    }

    /// Like [`to_ascii`](Self::to_ascii), but marks cells anchoring `color` with `*`.
    #[must_use]
    pub fn to_ascii_with_anchors(&self, color: Color) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.size.height);
        for row in self.cells.chunks(self.size.width) {
            for cell in row {
                out.push(match cell.occupant {
                    Some(occupant) => occupant.as_char(),
                    None if cell.anchor_for.contains(color) => '*',
                    None => '.',
                });
            }
            out.push('\n');
        }
        out
    }
}

fn size_contains(size: BoardSize, pos: Position) -> bool {
    usize::try_from(pos.x).is_ok_and(|x| x < size.width)
        && usize::try_from(pos.y).is_ok_and(|y| y < size.height)
}

fn to_coord(len: usize) -> i32 {
    i32::try_from(len).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;
    use crate::PieceCatalog;

    fn piece(color: Color, cells: &[(i32, i32)]) -> Piece {
        Piece::new("test", color, cells.to_vec()).unwrap()
    }

    fn monomino(color: Color) -> Piece {
        piece(color, &[(0, 0)])
    }

    /// Checks the anchor rule against the definition for every cell and color.
    fn assert_anchor_invariant(board: &Board) {
        let placed: ColorSet = board.cells.iter().filter_map(Cell::occupant).collect();
        for pos in board.positions() {
            let cell = board.cell(pos).unwrap();
            if !cell.is_empty() {
                assert!(cell.anchor_for().is_empty(), "occupied cell {pos} has anchors");
                continue;
            }
            for (color, start) in board.starting_positions() {
                let expected = (!placed.contains(*color) && *start == pos)
                    || (board.touches_diagonally(pos, *color)
                        && !board.touches_orthogonally(pos, *color));
                assert_eq!(
                    cell.anchor_for().contains(*color),
                    expected,
                    "anchor mismatch for {color} at {pos}"
                );
            }
        }
    }

    #[test]
    fn test_new_assigns_distinct_corners() {
        let mut rng = Pcg32::seed_from_u64(7);
        let board = Board::new(BoardSize::square(20), &Color::DEFAULT_PLAYERS, None, &mut rng).unwrap();
        let mut starts: Vec<_> = board.starting_positions().iter().map(|(_, p)| *p).collect();
        starts.sort();
        let mut corners = BoardSize::square(20).corners().to_vec();
        corners.sort();
        assert_eq!(starts, corners);
        for color in Color::DEFAULT_PLAYERS {
            let start = board.starting_position(color).unwrap();
            assert_eq!(board.legal_anchors(color), vec![start]);
        }
    }

    #[test]
    fn test_new_rejects_bad_setups() {
        let mut rng = Pcg32::seed_from_u64(0);
        assert_eq!(
            Board::new(BoardSize::square(20), &[], None, &mut rng),
            Err(GameSetupError::NoPlayers)
        );
        assert_eq!(
            Board::new(BoardSize::new(0, 5), &[Color::Blue], None, &mut rng),
            Err(GameSetupError::EmptyBoard { width: 0, height: 5 })
        );
        assert_eq!(
            Board::new(
                BoardSize::square(20),
                &[Color::Blue, Color::Red, Color::Green],
                Some(&[Position::new(0, 0), Position::new(5, 5)]),
                &mut rng
            ),
            Err(GameSetupError::NotEnoughStartingPositions { players: 3, positions: 2 })
        );
        assert_eq!(
            Board::new(BoardSize::square(20), &[Color::Blue, Color::Blue], None, &mut rng),
            Err(GameSetupError::DuplicateColor(Color::Blue))
        );
        assert!(matches!(
            Board::new(
                BoardSize::square(4),
                &[Color::Blue],
                Some(&[Position::new(4, 0)]),
                &mut rng
            ),
            Err(GameSetupError::StartingPositionOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_queries_are_total() {
        let board = Board::with_starting_positions(
            BoardSize::square(3),
            &[(Color::Blue, Position::new(0, 0))],
        )
        .unwrap();
        for pos in [
            Position::new(-1, 0),
            Position::new(3, 0),
            Position::new(i32::MIN, i32::MAX),
            Position::new(i32::MAX, i32::MAX),
        ] {
            assert!(!board.in_bounds(pos));
            assert_eq!(board.occupant(pos), None);
            assert!(!board.is_anchor_for(pos, Color::Blue));
            assert!(!board.fits(pos, &monomino(Color::Blue)));
        }
        let long = piece(Color::Blue, &[(0, 0), (i32::MAX, 0), (i32::MIN, 0)]);
        assert!(!board.fits(Position::new(0, 0), &long));
        assert!(!board.fits(Position::new(i32::MAX, i32::MIN), &long));
    }

    #[test]
    fn test_place_writes_exactly_covered_cells() {
        let mut board = Board::with_starting_positions(
            BoardSize::square(6),
            &[(Color::Blue, Position::new(0, 0)), (Color::Red, Position::new(5, 5))],
        )
        .unwrap();
        let before = board.clone();
        let l = piece(Color::Blue, &[(0, 0), (0, 1), (0, 2), (1, 2)]);
        assert!(board.place(Position::new(0, 0), &l));

        let covered: Vec<_> = l.absolute_cells(Position::new(0, 0)).collect();
        for pos in board.positions() {
            if covered.contains(&pos) {
                assert_eq!(board.occupant(pos), Some(Color::Blue));
                assert!(board.cell(pos).unwrap().anchor_for().is_empty());
            } else {
                assert_eq!(board.cell(pos), before.cell(pos), "cell {pos} changed");
            }
        }
    }

    #[test]
    fn test_failed_place_leaves_board_unchanged() {
        let mut board = Board::from_ascii(
            r"
            B...
            ....
            ....
            ...R
            ",
            &[(Color::Blue, Position::new(0, 0)), (Color::Red, Position::new(3, 3))],
        );
        let before = board.clone();
        // Edge contact with own color.
        assert!(!board.place(Position::new(1, 0), &monomino(Color::Blue)));
        // Occupied cell.
        assert!(!board.place(Position::new(3, 3), &monomino(Color::Blue)));
        // Not touching any anchor.
        assert!(!board.place(Position::new(2, 0), &monomino(Color::Blue)));
        // Off the board.
        assert!(!board.place(Position::new(3, 2), &piece(Color::Blue, &[(0, 0), (1, 0)])));
        assert_eq!(board, before);
    }

    #[test]
    fn test_fits_allows_touching_other_colors() {
        let board = Board::from_ascii(
            r"
            B....
            .....
            ..R..
            ",
            &[(Color::Blue, Position::new(0, 0)), (Color::Red, Position::new(2, 2))],
        );
        assert_eq!(board.legal_anchors(Color::Blue), vec![Position::new(1, 1)]);

        let domino = piece(Color::Blue, &[(0, 0), (1, 0)]);
        // (2, 1) shares an edge with red, which is allowed.
        assert!(board.fits(Position::new(1, 1), &domino));
        // (0, 1) shares an edge with blue.
        assert!(!board.fits(Position::new(0, 1), &domino));
    }

    #[test]
    fn test_anchor_invariant_after_random_play() {
        let catalog = PieceCatalog::standard();
        for seed in 0..20 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut board = Board::new(BoardSize::square(7), &Color::DEFAULT_PLAYERS, None, &mut rng).unwrap();
            assert_anchor_invariant(&board);
            for _ in 0..12 {
                for color in Color::DEFAULT_PLAYERS {
                    let hand = catalog.hand(color);
                    let candidate = &hand[rng.random_range(0..hand.len())];
                    let orientation = &candidate.orientations()[rng.random_range(0..8)];
                    let anchors = board.legal_anchors(color);
                    let Some(&target) = anchors.first() else { continue };
                    // Try every cell of the piece over the anchor.
                    for &(dx, dy) in orientation.cells() {
                        let origin = target.offset(-dx, -dy);
                        if board.place(origin, orientation) {
                            break;
                        }
                    }
                    board.recompute_anchors();
                    assert_anchor_invariant(&board);
                }
            }
        }
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let mut board = Board::from_ascii(
            r"
            BB...
            ..B.R
            ..B.R
            ...R.
            Y....
            ",
            &[
                (Color::Blue, Position::new(0, 0)),
                (Color::Red, Position::new(4, 0)),
                (Color::Yellow, Position::new(0, 4)),
                (Color::Green, Position::new(4, 4)),
            ],
        );
        board.recompute_anchors();
        let once = board.clone();
        board.recompute_anchors();
        assert_eq!(board, once);
        assert_anchor_invariant(&board);
        // Green has not played yet, so only its start is open.
        assert_eq!(board.legal_anchors(Color::Green), vec![Position::new(4, 4)]);
    }

    #[test]
    fn test_four_corner_single_cells() {
        let size = BoardSize::square(20);
        let corners = size.corners();
        let starts: Vec<_> = Color::DEFAULT_PLAYERS.into_iter().zip(corners).collect();
        let mut board = Board::with_starting_positions(size, &starts).unwrap();

        for &(color, start) in &starts {
            assert!(board.place(start, &monomino(color)));
        }
        board.recompute_anchors();

        for &(color, start) in &starts {
            let mut expected: Vec<_> = start
                .diagonal_neighbors()
                .filter(|pos| board.in_bounds(*pos))
                .collect();
            expected.sort_by_key(|pos| (pos.y, pos.x));
            assert_eq!(board.legal_anchors(color), expected, "anchors of {color}");
            assert_eq!(expected.len(), 1);
        }
    }

    #[test]
    fn test_stalemate() {
        let mut board = Board::with_starting_positions(
            BoardSize::square(1),
            &[(Color::Blue, Position::new(0, 0))],
        )
        .unwrap();
        let mut player = PlayerState::new(Color::Blue, vec![monomino(Color::Blue)]);
        assert!(!board.is_stalemate([&player]));

        player.knock();
        assert!(board.is_stalemate([&player]));
        player.revoke_knock();

        assert!(board.place(Position::new(0, 0), &monomino(Color::Blue)));
        board.recompute_anchors();
        assert!(board.is_stalemate([&player]));
        assert!(board.is_stalemate(std::iter::empty()));
    }

    #[test]
    fn test_bounding_box_and_occupancy() {
        let board = Board::from_ascii(
            r"
            B....
            .BR..
            ..BB.
            ....Y
            ",
            &[(Color::Blue, Position::new(0, 0))],
        );
        assert_eq!(
            board.bounding_box(Color::Blue),
            Some((Position::new(0, 0), Position::new(3, 2)))
        );
        assert_eq!(board.bounding_box(Color::Green), None);
        assert_eq!(board.occupied_in(Position::new(0, 0), Position::new(3, 2)), 3);
        assert_eq!(board.occupied_count(Color::Blue), 4);
    }

    #[test]
    fn test_ascii_round_trip() {
        let art = "B...\n.BR.\n....\n";
        let board = Board::from_ascii(art, &[(Color::Blue, Position::new(0, 0))]);
        assert_eq!(board.to_ascii(), art);
        assert_eq!(
            board.to_ascii_with_anchors(Color::Blue),
            "B.*.\n.BR.\n*.*.\n"
        );
    }
}
