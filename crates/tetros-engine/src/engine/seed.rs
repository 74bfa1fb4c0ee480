use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Random number generator used by boards, games and strategies.
pub type GameRng = Pcg32;

/// Seed for one reproducible game.
///
/// A 128-bit value that initializes the [`GameRng`] shared by the board
/// (starting position shuffle), the turn order shuffle and every strategy.
/// Playing the same roster with the same seed yields the same game.
///
/// Seeds serialize as 32 lowercase hex digits.
///
/// # Example
///
/// ```
/// use rand::Rng as _;
/// use tetros_engine::GameSeed;
///
/// let seed: GameSeed = rand::rng().random();
/// let parsed: GameSeed = seed.to_string().parse().unwrap();
/// assert_eq!(seed, parsed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSeed([u8; 16]);

/// A seed string was not exactly 32 hex digits.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid seed {input:?}: expected 32 hex digits")]
pub struct ParseSeedError {
    pub input: String,
}

impl GameSeed {
    /// Expands a small integer into a seed, mostly for tests and CLI shortcuts.
    #[must_use]
    pub fn from_u64(value: u64) -> Self {
        Self(u128::from(value).to_be_bytes())
    }

    #[must_use]
    pub fn rng(self) -> GameRng {
        Pcg32::from_seed(self.0)
    }
}

impl fmt::Display for GameSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for GameSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSeedError { input: s.to_owned() };
        if s.len() != 32 {
            return Err(err());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| err())?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for GameSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for GameSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Enables `rng.random::<GameSeed>()`.
impl Distribution<GameSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> GameSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        GameSeed(seed)
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng as _;

    use super::*;

    #[test]
    fn test_seed_hex_format() {
        let seed = GameSeed::from_u64(0xdead_beef);
        assert_eq!(seed.to_string(), "000000000000000000000000deadbeef");
        let json = serde_json::to_string(&seed).unwrap();
        assert_eq!(json, "\"000000000000000000000000deadbeef\"");
        let back: GameSeed = serde_json::from_str(&json).unwrap();
        assert_eq!(back, seed);
    }

    #[test]
    fn test_seed_rejects_bad_input() {
        assert!("1234".parse::<GameSeed>().is_err());
        assert!("zz000000000000000000000000000000".parse::<GameSeed>().is_err());
        assert!(serde_json::from_str::<GameSeed>("\"abc\"").is_err());
    }

    #[test]
    fn test_same_seed_same_stream() {
        let seed = GameSeed::from_u64(42);
        let a: Vec<u32> = (0..8).map(|_| seed.rng().random()).collect();
        let mut rng1 = seed.rng();
        let mut rng2 = seed.rng();
        let b: Vec<u32> = (0..8).map(|_| rng1.random()).collect();
        let c: Vec<u32> = (0..8).map(|_| rng2.random()).collect();
        assert_eq!(b, c);
        assert!(a.iter().all(|v| *v == a[0]), "a fresh rng always starts the same");
    }
}
