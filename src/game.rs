use std::{error::Error, fmt, str::FromStr};

use shakmaty::{
    san::{ParseSanError, SanPlus},
    Color,
};

use crate::Nag;

/// The result literals that terminate a game, in the order of
/// [`GameResult::ALL`].
pub const RESULTS: [&str; 4] = ["1-0", "0-1", "1/2-1/2", "*"];

/// Game termination marker, like `1-0` or `*`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameResult {
    #[cfg_attr(feature = "serde", serde(rename = "1-0"))]
    WhiteWins,
    #[cfg_attr(feature = "serde", serde(rename = "0-1"))]
    BlackWins,
    #[cfg_attr(feature = "serde", serde(rename = "1/2-1/2"))]
    Draw,
    /// Game in progress, abandoned, or result otherwise unknown (`*`).
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "*"))]
    Unknown,
}

impl GameResult {
    pub const ALL: [GameResult; 4] = [
        GameResult::WhiteWins,
        GameResult::BlackWins,
        GameResult::Draw,
        GameResult::Unknown,
    ];

    /// Parses one of the [`RESULTS`] literals.
    ///
    /// # Errors
    ///
    /// Returns [`ParseResultError`] for anything else.
    pub fn from_ascii(s: &[u8]) -> Result<GameResult, ParseResultError> {
        GameResult::ALL
            .into_iter()
            .find(|result| result.as_str().as_bytes() == s)
            .ok_or(ParseResultError)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            GameResult::WhiteWins => RESULTS[0],
            GameResult::BlackWins => RESULTS[1],
            GameResult::Draw => RESULTS[2],
            GameResult::Unknown => RESULTS[3],
        }
    }

    pub const fn winner(self) -> Option<Color> {
        match self {
            GameResult::WhiteWins => Some(Color::White),
            GameResult::BlackWins => Some(Color::Black),
            GameResult::Draw | GameResult::Unknown => None,
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameResult {
    type Err = ParseResultError;

    fn from_str(s: &str) -> Result<GameResult, ParseResultError> {
        GameResult::from_ascii(s.as_bytes())
    }
}

/// Error when parsing an invalid game result.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ParseResultError;

impl fmt::Display for ParseResultError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid game result")
    }
}

impl Error for ParseResultError {}

/// Tag pairs of a game, like `[White "Deep Blue"]`, in order of first
/// appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tags(Vec<(String, String)>);

impl Tags {
    pub fn new() -> Tags {
        Tags::default()
    }

    /// Sets a tag. A repeated name keeps its original position and gets the
    /// new value; the old value is returned.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.0.push((name, value));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.0.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for Tags {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Tags {
        let mut tags = Tags::new();
        for (name, value) in iter {
            tags.insert(name, value);
        }
        tags
    }
}

/// A single ply of movetext.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Move {
    /// The move as written, like `Nf3+`. Never checked for legality.
    pub san: String,
    /// Symbolic suffix like `!?`, or `$n` for codes without one. Empty if
    /// the move is not annotated.
    pub annotation: String,
    /// The numeric glyph behind [`Move::annotation`], if it has one. Codes
    /// with leading zeros, like `$03`, and codes above 255 have none.
    pub nag: Option<Nag>,
    pub comments: Vec<String>,
    /// Alternatives to this move. Each variation starts with a move played
    /// instead of this one.
    pub variations: Vec<Vec<Move>>,
}

impl Move {
    pub fn new(san: impl Into<String>) -> Move {
        Move {
            san: san.into(),
            ..Move::default()
        }
    }

    /// Decodes the move text as SAN, without checking legality.
    ///
    /// # Errors
    ///
    /// Returns [`ParseSanError`] if the move text is not syntactically
    /// valid SAN.
    pub fn san_plus(&self) -> Result<SanPlus, ParseSanError> {
        SanPlus::from_ascii(self.san.as_bytes())
    }
}

/// A parsed game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Game {
    pub tags: Tags,
    /// Comments before the first move of the mainline.
    pub comments: Vec<String>,
    /// The mainline.
    pub moves: Vec<Move>,
    pub result: GameResult,
}

impl Game {
    /// Shortcut for `self.tags.get(name)`.
    pub fn tag(&self, name: &str) -> Option<&str> {
        self.tags.get(name)
    }
}
