use std::{error, fmt, io};

/// Malformed game structure.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum StructureError {
    /// A `)` without a matching `(`. The stack of suspended parsing states
    /// was empty.
    UnbalancedNesting,
    /// The game result appeared while a variation was still open.
    UnclosedVariation,
    /// A `(` before the first move of the current line. There is no move the
    /// variation could branch from.
    VariationWithoutMove,
    /// The stream ended inside a game.
    UnexpectedEof,
    /// A new tag section started before the game result.
    MissingResult,
}

impl fmt::Display for StructureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            StructureError::UnbalancedNesting => "unbalanced nesting: unmatched variation end",
            StructureError::UnclosedVariation => "unclosed variation at end of game",
            StructureError::VariationWithoutMove => "variation without preceding move",
            StructureError::UnexpectedEof => "unexpected end of stream inside game",
            StructureError::MissingResult => "tag section inside movetext, missing game result",
        })
    }
}

impl error::Error for StructureError {}

/// The underlying reason a game could not be read.
#[derive(Debug)]
pub enum Cause {
    Io(io::Error),
    Structure(StructureError),
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cause::Io(err) => write!(f, "i/o error: {err}"),
            Cause::Structure(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl error::Error for Cause {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Cause::Io(err) => Some(err),
            Cause::Structure(err) => Some(err),
        }
    }
}

impl From<io::Error> for Cause {
    fn from(err: io::Error) -> Cause {
        Cause::Io(err)
    }
}

impl From<StructureError> for Cause {
    fn from(err: StructureError) -> Cause {
        Cause::Structure(err)
    }
}

/// Error when reading a game with a [`Reader`](crate::Reader).
#[derive(Debug)]
pub enum Error {
    /// The reader was used after [`Reader::release`](crate::Reader::release).
    Released,
    /// The game could not be read. The partially read game is discarded.
    Parse(Cause),
}

impl Error {
    pub fn cause(&self) -> Option<&Cause> {
        match self {
            Error::Released => None,
            Error::Parse(cause) => Some(cause),
        }
    }

    /// The structural problem, if that was the cause.
    pub fn structure(&self) -> Option<StructureError> {
        match self.cause() {
            Some(Cause::Structure(err)) => Some(*err),
            _ => None,
        }
    }

    /// `true` if the source failed. The stream should not be read further.
    pub fn is_io(&self) -> bool {
        matches!(self.cause(), Some(Cause::Io(_)))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Error::Released => "reader has been released",
            Error::Parse(_) => "a parsing error occurred",
        })
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Released => None,
            Error::Parse(cause) => Some(cause),
        }
    }
}

impl From<Cause> for Error {
    fn from(cause: Cause) -> Error {
        Error::Parse(cause)
    }
}
