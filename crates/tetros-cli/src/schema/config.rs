use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tetros_engine::{BoardSize, Color, Position};
use tetros_evaluator::{
    heatmap::Heatmap,
    move_selector::TieBreak,
    strategy::{
        AggressiveStrategy, DEFAULT_OPPONENT_ANCHOR_BONUS, DEFAULT_OPPONENT_PENALTY,
        DynamicHeatmapStrategy, ExhaustiveRandomStrategy, HeatmapSchedule,
        HeatmapSwitcherStrategy, PlayerKind, RandomStrategy, StaticHeatmapStrategy,
    },
};

/// One game table: board, starting cells and who sits where.
///
/// ```json
/// {
///   "board_size": { "width": 20, "height": 20 },
///   "players": [
///     { "color": "blue", "strategy": { "kind": "static_heatmap", "heatmap": "bullseye.txt" } },
///     { "color": "red", "strategy": { "kind": "random" } }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub board_size: BoardSize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starting_positions: Option<Vec<Position>>,
    pub players: Vec<SeatConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatConfig {
    pub color: Color,
    pub strategy: StrategyConfig,
}

/// A field of named entrants, seated four at a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueConfig {
    #[serde(default)]
    pub board_size: BoardSize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starting_positions: Option<Vec<Position>>,
    pub entrants: Vec<EntrantConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntrantConfig {
    pub name: String,
    pub strategy: StrategyConfig,
}

/// Heatmap used once the player has placed at least `after` pieces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageConfig {
    #[serde(default)]
    pub after: usize,
    pub heatmap: PathBuf,
}

/// Serialized form of a [`PlayerKind`]. Heatmap paths are relative to the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StrategyConfig {
    Random,
    ExhaustiveRandom,
    StaticHeatmap {
        heatmap: PathBuf,
        #[serde(default)]
        tie_break: TieBreak,
    },
    DynamicHeatmap {
        #[serde(default)]
        tie_break: TieBreak,
    },
    HeatmapSwitcher {
        stages: Vec<StageConfig>,
        #[serde(default)]
        tie_break: TieBreak,
    },
    Aggressive {
        stages: Vec<StageConfig>,
        #[serde(default = "default_opponent_penalty")]
        opponent_penalty: i32,
        #[serde(default = "default_opponent_anchor_bonus")]
        opponent_anchor_bonus: i32,
        #[serde(default)]
        tie_break: TieBreak,
    },
}

fn default_opponent_penalty() -> i32 {
    DEFAULT_OPPONENT_PENALTY
}

fn default_opponent_anchor_bonus() -> i32 {
    DEFAULT_OPPONENT_ANCHOR_BONUS
}

/// Strategies that need no heatmap files, selectable from the command line.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub enum BuiltinStrategy {
    Random,
    Exhaustive,
    #[default]
    Dynamic,
}

impl From<BuiltinStrategy> for StrategyConfig {
    fn from(value: BuiltinStrategy) -> Self {
        match value {
            BuiltinStrategy::Random => StrategyConfig::Random,
            BuiltinStrategy::Exhaustive => StrategyConfig::ExhaustiveRandom,
            BuiltinStrategy::Dynamic => StrategyConfig::DynamicHeatmap {
                tie_break: TieBreak::default(),
            },
        }
    }
}

impl StrategyConfig {
    /// Creates the strategy, loading heatmaps relative to `base_dir` and
    /// checking that they match `board_size`.
    pub fn build(&self, base_dir: &Path, board_size: BoardSize) -> anyhow::Result<PlayerKind> {
        let kind = match self {
            StrategyConfig::Random => RandomStrategy::new().into(),
            StrategyConfig::ExhaustiveRandom => ExhaustiveRandomStrategy::new().into(),
            StrategyConfig::StaticHeatmap { heatmap, tie_break } => {
                let heatmap = load_heatmap(base_dir, heatmap, board_size)?;
                StaticHeatmapStrategy::new(heatmap, *tie_break).into()
            }
            StrategyConfig::DynamicHeatmap { tie_break } => {
                DynamicHeatmapStrategy::new(*tie_break).into()
            }
            StrategyConfig::HeatmapSwitcher { stages, tie_break } => {
                let schedule = load_schedule(base_dir, stages, board_size)?;
                HeatmapSwitcherStrategy::new(schedule, *tie_break).into()
            }
            StrategyConfig::Aggressive {
                stages,
                opponent_penalty,
                opponent_anchor_bonus,
                tie_break,
            } => {
                let schedule = load_schedule(base_dir, stages, board_size)?;
                AggressiveStrategy::new(
                    schedule,
                    *opponent_penalty,
                    *opponent_anchor_bonus,
                    *tie_break,
                )
                .into()
            }
        };
        Ok(kind)
    }
}

fn load_heatmap(base_dir: &Path, path: &Path, board_size: BoardSize) -> anyhow::Result<Heatmap> {
    let path = base_dir.join(path);
    let heatmap = Heatmap::load(&path)?;
    heatmap
        .check_size(board_size)
        .with_context(|| format!("Heatmap {} does not fit the board", path.display()))?;
    Ok(heatmap)
}

fn load_schedule(
    base_dir: &Path,
    stages: &[StageConfig],
    board_size: BoardSize,
) -> anyhow::Result<HeatmapSchedule> {
    let stages = stages
        .iter()
        .map(|stage| Ok((stage.after, load_heatmap(base_dir, &stage.heatmap, board_size)?)))
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(HeatmapSchedule::new(stages)?)
}

impl GameConfig {
    /// The four default colors on a standard board, all playing `strategy`.
    pub fn with_default_players(strategy: &StrategyConfig) -> Self {
        Self {
            board_size: BoardSize::default(),
            starting_positions: None,
            players: Color::DEFAULT_PLAYERS
                .into_iter()
                .map(|color| SeatConfig {
                    color,
                    strategy: strategy.clone(),
                })
                .collect(),
        }
    }

    pub fn roster(&self, base_dir: &Path) -> anyhow::Result<Vec<(Color, PlayerKind)>> {
        self.players
            .iter()
            .map(|seat| {
                let kind = seat
                    .strategy
                    .build(base_dir, self.board_size)
                    .with_context(|| format!("Failed to set up the {} player", seat.color))?;
                Ok((seat.color, kind))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util;

    fn demos_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos")
    }

    #[test]
    fn test_demo_game_config() {
        let path = demos_dir().join("game.json");
        let config: GameConfig = util::read_json_file("game config", &path).unwrap();
        assert_eq!(config.board_size, BoardSize::square(20));
        assert!(config.starting_positions.is_none());

        let roster = config.roster(util::config_dir(&path)).unwrap();
        let names: Vec<_> = roster.iter().map(|(_, kind)| kind.name()).collect();
        assert_eq!(
            names,
            ["static_heatmap", "dynamic_heatmap", "heatmap_switcher", "aggressive"]
        );
        assert_eq!(roster[3].0, Color::Yellow);
    }

    #[test]
    fn test_demo_league_config() {
        let path = demos_dir().join("league.json");
        let config: LeagueConfig = util::read_json_file("league config", &path).unwrap();
        assert_eq!(config.entrants.len(), 6);
        for entrant in &config.entrants {
            entrant
                .strategy
                .build(util::config_dir(&path), config.board_size)
                .unwrap();
        }
        // Omitted tuning knobs fall back to the defaults.
        let StrategyConfig::Aggressive {
            opponent_penalty,
            opponent_anchor_bonus,
            tie_break,
            ..
        } = &config.entrants[4].strategy
        else {
            panic!("expected an aggressive entrant");
        };
        assert_eq!(*opponent_penalty, DEFAULT_OPPONENT_PENALTY);
        assert_eq!(*opponent_anchor_bonus, DEFAULT_OPPONENT_ANCHOR_BONUS);
        assert_eq!(*tie_break, TieBreak::Random);
    }

    #[test]
    fn test_heatmap_must_fit_board() {
        let config = StrategyConfig::StaticHeatmap {
            heatmap: "bullseye.txt".into(),
            tie_break: TieBreak::Random,
        };
        let err = config.build(&demos_dir(), BoardSize::square(10)).unwrap_err();
        assert!(format!("{err:#}").contains("20x20"), "{err:#}");

        let missing = StrategyConfig::HeatmapSwitcher {
            stages: vec![StageConfig {
                after: 0,
                heatmap: "no_such_map.txt".into(),
            }],
            tie_break: TieBreak::Random,
        };
        assert!(missing.build(&demos_dir(), BoardSize::square(20)).is_err());

        let empty = StrategyConfig::Aggressive {
            stages: vec![],
            opponent_penalty: 1,
            opponent_anchor_bonus: 1,
            tie_break: TieBreak::Random,
        };
        assert!(empty.build(&demos_dir(), BoardSize::square(20)).is_err());
    }

    #[test]
    fn test_builtin_strategies() {
        assert_eq!("random".parse::<BuiltinStrategy>().unwrap(), BuiltinStrategy::Random);
        assert_eq!("dynamic".parse::<BuiltinStrategy>().unwrap(), BuiltinStrategy::Dynamic);

        let config = GameConfig::with_default_players(&BuiltinStrategy::Exhaustive.into());
        let roster = config.roster(Path::new(".")).unwrap();
        assert_eq!(roster.len(), 4);
        assert!(roster.iter().all(|(_, kind)| kind.name() == "exhaustive_random"));
    }

    #[test]
    fn test_strategy_json_shape() {
        let parsed: StrategyConfig =
            serde_json::from_str(r#"{ "kind": "dynamic_heatmap", "tie_break": "largest_piece" }"#).unwrap();
        assert!(matches!(
            parsed,
            StrategyConfig::DynamicHeatmap { tie_break: TieBreak::LargestPiece }
        ));
        let json = serde_json::to_string(&StrategyConfig::Random).unwrap();
        assert_eq!(json, r#"{"kind":"random"}"#);
    }
}
