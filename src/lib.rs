//! A streaming reader for chess games in PGN notation.
//!
//! [`Reader`] pulls characters from any [`std::io::Read`] source and feeds
//! them to a small state machine, one character and one character of
//! lookahead at a time. Each call to [`Reader::read_game()`] materializes
//! exactly one [`Game`]: tag pairs, moves with their annotations, comments
//! and nested variations, and the result.
//!
//! * Moves are not checked for legality. [`Move::san_plus()`] decodes the
//!   move text syntactically, if needed.
//! * Variations and comments nest without recursion. Suspended parsing
//!   states are kept on an explicit stack.
//! * Games do not depend on where the source happens to split its reads.
//!
//! # Examples
//!
//! ```
//! use pgn_machine::{GameResult, Nag, Reader};
//!
//! let pgn = b"[Event \"Casual Game\"]
//!             [White \"Anderssen\"]
//!
//!             1. e4 e5 2. f4!? { the King's Gambit } (2. Nf3 $1) 2... exf4 1-0";
//!
//! let mut reader = Reader::new(&pgn[..]);
//! let game = reader.read_game()?.expect("game found");
//!
//! assert_eq!(game.tag("White"), Some("Anderssen"));
//! assert_eq!(game.moves.len(), 4);
//! assert_eq!(game.moves[2].san, "f4");
//! assert_eq!(game.moves[2].nag, Some(Nag::SPECULATIVE_MOVE));
//! assert_eq!(game.moves[2].comments, ["the King's Gambit"]);
//! assert_eq!(game.moves[2].variations[0][0].annotation, "!");
//! assert_eq!(game.result, GameResult::WhiteWins);
//!
//! assert!(reader.read_game()?.is_none());
//! # Ok::<_, pgn_machine::Error>(())
//! ```
//!
//! # Logging
//!
//! Diagnostics are emitted through [`tracing`](https://docs.rs/tracing).
//! The library never installs a subscriber.
//!
//! # Feature flags
//!
//! * `serde`: Implements [`serde::Serialize`](https://docs.rs/serde/1/serde/trait.Serialize.html)
//!   and [`serde::Deserialize`](https://docs.rs/serde/1/serde/trait.Deserialize.html) for
//!   [`Game`] and its parts.

#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]
#![cfg_attr(docs_rs, feature(doc_auto_cfg))]

mod buffer;
mod context;
mod game;
mod machine;
mod reader;
mod state;
mod tag;

pub mod config;
pub mod errors;
pub mod nag;

pub use config::{Config, Options};
pub use errors::{Cause, Error, StructureError};
pub use game::{Game, GameResult, Move, ParseResultError, Tags, RESULTS};
pub use nag::Nag;
pub use reader::Reader;
pub use shakmaty::{self, san::SanPlus, Color};
