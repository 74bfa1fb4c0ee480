use log::{debug, info};
use rand::seq::SliceRandom as _;

use crate::{
    GameSetupError,
    core::{Board, BoardSize, Color, ColorSet, Position},
};

use super::{
    player::{Player, PlayerState, Strategy},
    score::ScoreTable,
    seed::{GameRng, GameSeed},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum GameState {
    InProgress,
    GameOver,
}

/// Turn controller for one game.
///
/// Seating order and starting cells are both shuffled from the seed when the
/// game is created. Each round every player that has not knocked takes one
/// turn; anchors are recomputed after each placement so the next player sees
/// the current board. The game ends once every player is knocked or stuck, or
/// someone has placed their whole hand.
///
/// # Example
///
/// ```
/// use tetros_engine::{BoardSize, Color, Game, GameSeed, Move, Player, PlayerState, Strategy};
///
/// /// Plays the first piece of the hand on the first anchor, if it fits.
/// struct FirstFit;
///
/// impl Strategy for FirstFit {
///     fn select_move(
///         &mut self,
///         state: &mut PlayerState,
///         board: &tetros_engine::Board,
///         _rng: &mut tetros_engine::GameRng,
///     ) -> Option<Move> {
///         let piece = state.hand().first()?;
///         let anchor = *board.legal_anchors(state.color()).first()?;
///         board
///             .fits(anchor, piece)
///             .then(|| Move::new(piece.clone(), 0, anchor))
///     }
/// }
///
/// let players = Color::DEFAULT_PLAYERS
///     .into_iter()
///     .map(|color| Player::new(PlayerState::new(color, tetros_engine::PieceCatalog::standard().hand(color)), FirstFit))
///     .collect();
/// let mut game = Game::new(BoardSize::square(20), players, None, GameSeed::from_u64(1)).unwrap();
/// let table = game.play();
///
/// assert!(game.state().is_game_over());
/// assert_eq!(table.scores.len(), 4);
/// assert!(table.winners().count() >= 1);
/// ```
#[derive(Debug, Clone)]
pub struct Game<S> {
    board: Board,
    players: Vec<Player<S>>,
    rng: GameRng,
    state: GameState,
    rounds: usize,
}

impl<S> Game<S>
where
    S: Strategy,
{
    pub fn new(
        size: BoardSize,
        mut players: Vec<Player<S>>,
        starting_positions: Option<&[Position]>,
        seed: GameSeed,
    ) -> Result<Self, GameSetupError> {
        let mut seen = ColorSet::EMPTY;
        for player in &players {
            if seen.contains(player.color()) {
                return Err(GameSetupError::DuplicateColor(player.color()));
            }
            seen.insert(player.color());
        }

        let mut rng = seed.rng();
        players.shuffle(&mut rng);
        let colors: Vec<Color> = players.iter().map(Player::color).collect();
        let board = Board::new(size, &colors, starting_positions, &mut rng)?;
        Ok(Self {
            board,
            players,
            rng,
            state: GameState::InProgress,
            rounds: 0,
        })
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Players in seating order.
    #[must_use]
    pub fn players(&self) -> &[Player<S>] {
        &self.players
    }

    #[must_use]
    pub fn state(&self) -> GameState {
        self.state
    }

    #[must_use]
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    fn player_states(&self) -> impl Iterator<Item = &PlayerState> {
        self.players.iter().map(Player::state)
    }

    /// Returns true on stalemate or once any player has emptied their hand.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.board.is_stalemate(self.player_states())
            || self.player_states().any(PlayerState::has_emptied_hand)
    }

    /// Plays one full round. Does nothing once the game is over.
    pub fn play_round(&mut self) {
        if self.state.is_game_over() {
            return;
        }
        if self.is_finished() {
            self.state = GameState::GameOver;
            return;
        }

        self.rounds += 1;
        let mut placed = 0;
        for player in &mut self.players {
            if player.state().is_knocked() {
                continue;
            }
            if player.take_turn(&mut self.board, &mut self.rng) {
                self.board.recompute_anchors();
                placed += 1;
            }
        }
        debug!("round {}: {placed} pieces placed", self.rounds);

        if self.is_finished() {
            self.state = GameState::GameOver;
        }
    }

    /// Plays rounds until the game is over and scores the final board.
    pub fn play(&mut self) -> ScoreTable {
        while self.state.is_in_progress() {
            self.play_round();
        }
        let table = self.score();
        info!(
            "game over after {} rounds, winners: {}",
            table.rounds,
            table
                .winners()
                .map(|s| s.color.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
        table
    }

    #[must_use]
    pub fn score(&self) -> ScoreTable {
        ScoreTable::compute(&self.board, self.player_states(), self.rounds)
    }

    /// Consumes the game, returning the players so their strategies can be reused.
    #[must_use]
    pub fn into_players(self) -> Vec<Player<S>> {
        self.players
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, Move, PieceCatalog};

    /// Places the first hand piece in its first fitting orientation on any anchor.
    struct Greedy;

    impl Strategy for Greedy {
        fn select_move(
            &mut self,
            state: &mut PlayerState,
            board: &Board,
            _rng: &mut GameRng,
        ) -> Option<Move> {
            for anchor in board.legal_anchors(state.color()) {
                for (index, piece) in state.hand().iter().enumerate() {
                    for orientation in piece.orientations() {
                        for &(dx, dy) in orientation.cells() {
                            let origin = anchor.offset(-dx, -dy);
                            if board.fits(origin, &orientation) {
                                return Some(Move::new(orientation, index, origin));
                            }
                        }
                    }
                }
            }
            None
        }
    }

    fn players(colors: &[Color]) -> Vec<Player<Greedy>> {
        colors
            .iter()
            .map(|&color| Player::new(PlayerState::new(color, PieceCatalog::standard().hand(color)), Greedy))
            .collect()
    }

    #[test]
    fn test_single_cell_board() {
        let monomino = PieceCatalog::standard().hand(Color::Blue)[0].clone();
        let player = Player::new(PlayerState::new(Color::Blue, vec![monomino]), Greedy);
        let mut game = Game::new(BoardSize::square(1), vec![player], None, GameSeed::from_u64(3)).unwrap();

        let table = game.play();
        assert!(game.state().is_game_over());
        assert_eq!(game.rounds(), 1);
        assert_eq!(game.board().occupant(Position::new(0, 0)), Some(Color::Blue));
        assert!(game.players()[0].state().has_emptied_hand());
        assert_eq!(table.scores[0].points, 20);
        assert!(table.scores[0].win);
    }

    #[test]
    fn test_game_runs_to_completion() {
        let mut game = Game::new(
            BoardSize::square(20),
            players(&Color::DEFAULT_PLAYERS),
            None,
            GameSeed::from_u64(11),
        )
        .unwrap();
        let table = game.play();

        assert!(game.is_finished());
        assert_eq!(table.scores.len(), 4);
        assert!(table.scores.windows(2).all(|w| w[0].points >= w[1].points));
        for score in &table.scores {
            let player = game.players().iter().find(|p| p.color() == score.color).unwrap();
            assert_eq!(player.state().placed_pieces() + player.state().hand().len(), 21);
            assert_eq!(game.board().occupied_count(score.color), 89 - score.squares_left);
        }

        // A finished game stays finished.
        let rounds = game.rounds();
        game.play_round();
        assert_eq!(game.rounds(), rounds);
    }

    #[test]
    fn test_same_seed_same_game() {
        let play = |seed| {
            let mut game = Game::new(BoardSize::square(14), players(&Color::DEFAULT_PLAYERS), None, seed).unwrap();
            let table = game.play();
            (game.board().to_ascii(), table)
        };
        assert_eq!(play(GameSeed::from_u64(5)), play(GameSeed::from_u64(5)));
    }

    #[test]
    fn test_setup_errors() {
        assert_eq!(
            Game::new(BoardSize::square(20), players(&[]), None, GameSeed::from_u64(0)).err(),
            Some(GameSetupError::NoPlayers)
        );
        assert_eq!(
            Game::new(
                BoardSize::square(20),
                players(&[Color::Red, Color::Red]),
                None,
                GameSeed::from_u64(0)
            )
            .err(),
            Some(GameSetupError::DuplicateColor(Color::Red))
        );
        assert_eq!(
            Game::new(
                BoardSize::square(20),
                players(&[Color::Red, Color::Blue, Color::Green, Color::Yellow, Color::Cyan]),
                None,
                GameSeed::from_u64(0)
            )
            .err(),
            Some(GameSetupError::NotEnoughStartingPositions { players: 5, positions: 4 })
        );
    }
}
