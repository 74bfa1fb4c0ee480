use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tetros_engine::{Color, PlayerScore, ScoreTable};

/// Running sums of one player's scores over several games.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerTotals {
    pub games: usize,
    pub wins: usize,
    pub points: i64,
    pub squares_left: u64,
    pub placed_pieces: u64,
    pub coverage: f64,
    pub density: f64,
    pub territory: u64,
}

/// Per-game means of a [`PlayerTotals`].
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerAverages {
    pub games: usize,
    pub win_rate: f64,
    pub points: f64,
    pub squares_left: f64,
    pub placed_pieces: f64,
    pub coverage: f64,
    pub density: f64,
    pub territory: f64,
}

impl PlayerTotals {
    pub fn add(&mut self, score: &PlayerScore) {
        self.games += 1;
        self.wins += usize::from(score.win);
        self.points += i64::from(score.points);
        self.squares_left += score.squares_left as u64;
        self.placed_pieces += score.placed_pieces as u64;
        self.coverage += score.coverage;
        self.density += score.density;
        self.territory += u64::from(score.territory);
    }

    pub fn merge(&mut self, other: &Self) {
        self.games += other.games;
        self.wins += other.wins;
        self.points += other.points;
        self.squares_left += other.squares_left;
        self.placed_pieces += other.placed_pieces;
        self.coverage += other.coverage;
        self.density += other.density;
        self.territory += other.territory;
    }

    /// Divides every sum by the number of games. All zeros when no game was played.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn average(&self) -> PlayerAverages {
        if self.games == 0 {
            return PlayerAverages::default();
        }
        let games = self.games as f64;
        PlayerAverages {
            games: self.games,
            win_rate: self.wins as f64 / games,
            points: self.points as f64 / games,
            squares_left: self.squares_left as f64 / games,
            placed_pieces: self.placed_pieces as f64 / games,
            coverage: self.coverage / games,
            density: self.density / games,
            territory: self.territory as f64 / games,
        }
    }
}

/// Totals for every color over a batch of games.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreTotals {
    pub games: usize,
    pub rounds: u64,
    pub players: BTreeMap<Color, PlayerTotals>,
}

impl ScoreTotals {
    pub fn add_table(&mut self, table: &ScoreTable) {
        self.games += 1;
        self.rounds += table.rounds as u64;
        for score in &table.scores {
            self.players.entry(score.color).or_default().add(score);
        }
    }

    pub fn merge(&mut self, other: &Self) {
        self.games += other.games;
        self.rounds += other.rounds;
        for (color, totals) in &other.players {
            self.players.entry(*color).or_default().merge(totals);
        }
    }

    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn average_rounds(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.rounds as f64 / self.games as f64
        }
    }

    #[must_use]
    pub fn averages(&self) -> BTreeMap<Color, PlayerAverages> {
        self.players
            .iter()
            .map(|(color, totals)| (*color, totals.average()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(color: Color, points: i32, win: bool) -> PlayerScore {
        PlayerScore {
            color,
            coverage: 10.0,
            density: 50.0,
            territory: 0,
            squares_left: usize::try_from(points.unsigned_abs()).unwrap(),
            points,
            placed_pieces: 15,
            win,
        }
    }

    #[test]
    fn test_add_and_average() {
        let mut totals = ScoreTotals::default();
        totals.add_table(&ScoreTable {
            rounds: 18,
            scores: vec![score(Color::Blue, -4, true), score(Color::Red, -10, false)],
        });
        totals.add_table(&ScoreTable {
            rounds: 20,
            scores: vec![score(Color::Red, -2, true), score(Color::Blue, -6, false)],
        });

        assert_eq!(totals.games, 2);
        assert!((totals.average_rounds() - 19.0).abs() < 1e-9);
        let blue = &totals.players[&Color::Blue];
        assert_eq!(blue.games, 2);
        assert_eq!(blue.wins, 1);
        assert_eq!(blue.points, -10);
        assert_eq!(blue.squares_left, 10);

        let averages = totals.averages();
        assert!((averages[&Color::Blue].points + 5.0).abs() < 1e-9);
        assert!((averages[&Color::Red].win_rate - 0.5).abs() < 1e-9);
        assert!((averages[&Color::Red].placed_pieces - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_merge_matches_sequential_adds() {
        let tables = [
            ScoreTable { rounds: 3, scores: vec![score(Color::Blue, 20, true)] },
            ScoreTable { rounds: 5, scores: vec![score(Color::Blue, -7, true)] },
            ScoreTable { rounds: 4, scores: vec![score(Color::Blue, -1, true)] },
        ];

        let mut sequential = ScoreTotals::default();
        for table in &tables {
            sequential.add_table(table);
        }

        let mut left = ScoreTotals::default();
        left.add_table(&tables[0]);
        let mut right = ScoreTotals::default();
        right.add_table(&tables[1]);
        right.add_table(&tables[2]);
        left.merge(&right);

        assert_eq!(left, sequential);
    }

    #[test]
    fn test_empty_average() {
        assert_eq!(PlayerTotals::default().average(), PlayerAverages::default());
        assert!(ScoreTotals::default().average_rounds().abs() < f64::EPSILON);
    }
}
