use serde::{Deserialize, Serialize};

/// The color identifying a player and every cell that player has covered.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Deserialize,
    Serialize,
    derive_more::Display,
    derive_more::FromStr,
)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Color {
    #[display("blue")]
    Blue = 0,
    #[display("green")]
    Green = 1,
    #[display("red")]
    Red = 2,
    #[display("yellow")]
    Yellow = 3,
    #[display("magenta")]
    Magenta = 4,
    #[display("cyan")]
    Cyan = 5,
    #[display("grey")]
    Grey = 6,
    #[display("white")]
    White = 7,
}

impl Color {
    /// Number of distinct colors.
    pub const LEN: usize = 8;

    pub const ALL: [Self; Self::LEN] = [
        Color::Blue,
        Color::Green,
        Color::Red,
        Color::Yellow,
        Color::Magenta,
        Color::Cyan,
        Color::Grey,
        Color::White,
    ];

    /// The colors of a default four-player game, in seating order.
    pub const DEFAULT_PLAYERS: [Self; 4] = [Color::Blue, Color::Green, Color::Red, Color::Yellow];

    const fn bit(self) -> u8 {
        1 << (self as u8)
    }

    /// Returns the single character used for this color in ASCII board dumps.
    ///
    /// # Examples
    ///
    /// ```
    /// use tetros_engine::Color;
    ///
    /// assert_eq!(Color::Blue.as_char(), 'B');
    /// assert_eq!(Color::from_char('Y'), Some(Color::Yellow));
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Color::Blue => 'B',
            Color::Green => 'G',
            Color::Red => 'R',
            Color::Yellow => 'Y',
            Color::Magenta => 'M',
            Color::Cyan => 'C',
            Color::Grey => 'K',
            Color::White => 'W',
        }
    }

    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'B' => Some(Color::Blue),
            'G' => Some(Color::Green),
            'R' => Some(Color::Red),
            'Y' => Some(Color::Yellow),
            'M' => Some(Color::Magenta),
            'C' => Some(Color::Cyan),
            'K' => Some(Color::Grey),
            'W' => Some(Color::White),
            _ => None,
        }
    }
}

/// A small set of colors stored as a bitmask.
///
/// Each board cell keeps one of these to record which colors may currently
/// anchor a new piece there.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorSet {
    bits: u8,
}

impl ColorSet {
    pub const EMPTY: Self = Self { bits: 0 };

    #[must_use]
    pub const fn contains(self, color: Color) -> bool {
        self.bits & color.bit() != 0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    #[must_use]
    pub const fn len(self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn insert(&mut self, color: Color) {
        self.bits |= color.bit();
    }

    pub fn remove(&mut self, color: Color) {
        self.bits &= !color.bit();
    }

    pub fn clear(&mut self) {
        self.bits = 0;
    }

    /// Iterates the colors in the set in [`Color::ALL`] order.
    pub fn iter(self) -> impl Iterator<Item = Color> {
        Color::ALL.into_iter().filter(move |c| self.contains(*c))
    }
}

impl FromIterator<Color> for ColorSet {
    fn from_iter<I: IntoIterator<Item = Color>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for color in iter {
            set.insert(color);
        }
        set
    }
}
