//! Numeric annotation glyphs and their symbolic suffixes.

use std::{borrow::Cow, error::Error, fmt, str::FromStr};

/// Symbolic suffixes of the numeric annotation codes `$0` to `$9`, keyed by
/// their decimal code.
pub const ANNOTATIONS: [(&str, &str); 10] = [
    ("0", ""),
    ("1", "!"),
    ("2", "?"),
    ("3", "!!"),
    ("4", "??"),
    ("5", "!?"),
    ("6", "?!"),
    ("7", "(forced move)"),
    ("8", "(singular move)"),
    ("9", "(worst move)"),
];

/// Decodes the digits of a numeric annotation glyph.
///
/// Exact codes `"0"` to `"9"` map to their entry in [`ANNOTATIONS`]. Any
/// other code `d` is kept as `$d`.
///
/// # Examples
///
/// ```
/// use pgn_machine::nag::annotation;
///
/// assert_eq!(annotation("3"), "!!");
/// assert_eq!(annotation("123"), "$123");
/// assert_eq!(annotation("03"), "$03");
/// ```
pub fn annotation(code: &str) -> Cow<'static, str> {
    match ANNOTATIONS.iter().find(|&&(key, _)| key == code) {
        Some(&(_, glyph)) => Cow::Borrowed(glyph),
        None => Cow::Owned(format!("${code}")),
    }
}

/// A numeric annotation glyph like `?`, `!!` or `$42`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Nag(pub u8);

impl Nag {
    /// Tries to parse a NAG from ASCII.
    ///
    /// # Examples
    ///
    /// ```
    /// use pgn_machine::Nag;
    ///
    /// assert_eq!(Nag::from_ascii(b"??"), Ok(Nag(4)));
    /// assert_eq!(Nag::from_ascii(b"$24"), Ok(Nag(24)));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidNag`] error if the input is neither a known glyph
    /// (`?!`, `!`, ...) nor a valid numeric annotation (`$0`, ..., `$255`).
    pub fn from_ascii(s: &[u8]) -> Result<Nag, InvalidNag> {
        match s {
            b"?!" => Ok(Nag::DUBIOUS_MOVE),
            b"?" => Ok(Nag::MISTAKE),
            b"??" => Ok(Nag::BLUNDER),
            b"!" => Ok(Nag::GOOD_MOVE),
            b"!!" => Ok(Nag::BRILLIANT_MOVE),
            b"!?" => Ok(Nag::SPECULATIVE_MOVE),
            [b'$', digits @ ..] if !digits.is_empty() => {
                btoi::btou(digits).ok().map(Nag).ok_or(InvalidNag)
            }
            _ => Err(InvalidNag),
        }
    }

    /// The symbolic suffix of this glyph, or `$n` if it has none.
    pub fn annotation(self) -> Cow<'static, str> {
        annotation(&self.0.to_string())
    }

    /// A null annotation (`$0`).
    pub const NULL: Nag = Nag(0);

    /// A good move (`!`).
    pub const GOOD_MOVE: Nag = Nag(1);

    /// A mistake (`?`).
    pub const MISTAKE: Nag = Nag(2);

    /// A brilliant move (`!!`).
    pub const BRILLIANT_MOVE: Nag = Nag(3);

    /// A blunder (`??`).
    pub const BLUNDER: Nag = Nag(4);

    /// A speculative move (`!?`).
    pub const SPECULATIVE_MOVE: Nag = Nag(5);

    /// A dubious move (`?!`).
    pub const DUBIOUS_MOVE: Nag = Nag(6);

    /// A forced move (`$7`).
    pub const FORCED_MOVE: Nag = Nag(7);

    /// A singular move (`$8`).
    pub const SINGULAR_MOVE: Nag = Nag(8);

    /// The worst move (`$9`).
    pub const WORST_MOVE: Nag = Nag(9);
}

impl fmt::Display for Nag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

impl From<u8> for Nag {
    fn from(nag: u8) -> Nag {
        Nag(nag)
    }
}

impl From<Nag> for u8 {
    fn from(Nag(nag): Nag) -> u8 {
        nag
    }
}

impl FromStr for Nag {
    type Err = InvalidNag;

    fn from_str(s: &str) -> Result<Nag, InvalidNag> {
        Nag::from_ascii(s.as_bytes())
    }
}

/// Error when parsing an invalid NAG.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct InvalidNag;

impl fmt::Display for InvalidNag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid nag")
    }
}

impl Error for InvalidNag {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotation_table() {
        let expected = [
            "",
            "!",
            "?",
            "!!",
            "??",
            "!?",
            "?!",
            "(forced move)",
            "(singular move)",
            "(worst move)",
        ];
        for (code, glyph) in expected.iter().enumerate() {
            assert_eq!(annotation(&code.to_string()), *glyph);
        }
    }

    #[test]
    fn test_annotation_fallback() {
        assert_eq!(annotation("10"), "$10");
        assert_eq!(annotation("123"), "$123");
        assert_eq!(annotation("00"), "$00");
        assert_eq!(annotation(""), "$");
    }

    #[test]
    fn test_nag() {
        assert_eq!(Nag::from_ascii(b"$1"), Ok(Nag(1)));
        assert_eq!(Nag::from_ascii(b"$12"), Ok(Nag(12)));
        assert_eq!(Nag::from_ascii(b"$123"), Ok(Nag(123)));
        assert_eq!(Nag::from_ascii(b"$1234"), Err(InvalidNag));
        assert_eq!(Nag::from_ascii(b"$"), Err(InvalidNag));
        assert_eq!(Nag::from_ascii(b"!?"), Ok(Nag::SPECULATIVE_MOVE));
        assert_eq!(Nag::from_ascii(b"!!!"), Err(InvalidNag));
    }

    #[test]
    fn test_nag_annotation() {
        assert_eq!(Nag::FORCED_MOVE.annotation(), "(forced move)");
        assert_eq!(Nag(42).annotation(), "$42");
        assert_eq!(Nag(42).to_string(), "$42");
    }
}
