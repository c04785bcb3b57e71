use std::io::Read;

use tracing::{debug, trace};

use crate::{
    buffer::Input,
    config::Config,
    errors::{Cause, Error},
    machine::{Flow, Machine},
    Game,
};

/// Reads games from a PGN stream, one per call.
///
/// The reader owns the stream. It is dropped on [`Reader::release()`] or
/// when the reader itself is dropped.
///
/// # Examples
///
/// ```
/// use pgn_machine::{GameResult, Reader};
///
/// let pgn = b"[White \"Morphy\"]\n1. e4 e5 1-0\n\n1. d4 *\n";
/// let mut reader = Reader::new(&pgn[..]);
///
/// let first = reader.read_game()?.expect("first game");
/// assert_eq!(first.tag("White"), Some("Morphy"));
/// assert_eq!(first.result, GameResult::WhiteWins);
///
/// let second = reader.read_game()?.expect("second game");
/// assert_eq!(second.moves[0].san, "d4");
///
/// assert!(reader.read_game()?.is_none());
/// # Ok::<_, pgn_machine::Error>(())
/// ```
#[derive(Debug)]
pub struct Reader<R: Read> {
    input: Option<Input<R>>,
    machine: Machine,
    config: Config,
}

impl<R: Read> Reader<R> {
    pub fn new(reader: R) -> Reader<R> {
        Reader::with_config(reader, Config::default())
    }

    pub fn with_config(reader: R, config: Config) -> Reader<R> {
        Reader {
            input: Some(Input::new(reader, &config)),
            machine: Machine::new(config.options),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Reads the next game.
    ///
    /// Returns `Ok(None)` if only whitespace was left in the stream.
    ///
    /// # Errors
    ///
    /// * [`Error::Released`] if the stream has been released.
    /// * [`Error::Parse`] if the stream failed or the game is malformed.
    ///   The partially read game is discarded. Reading can continue with
    ///   the next game, unless the cause is an I/O error.
    pub fn read_game(&mut self) -> Result<Option<Game>, Error> {
        let input = self.input.as_mut().ok_or(Error::Released)?;
        let result = read_game(input, &mut self.machine);
        if let Err(ref err) = result {
            debug!(%err, depth = self.machine.depth(), "discarding game");
            self.machine.reset();
        }
        result.map_err(Error::Parse)
    }

    /// Drops the stream. Calling this more than once has no further effect.
    pub fn release(&mut self) {
        if self.input.take().is_some() {
            debug!("released stream");
        }
    }

    pub fn is_released(&self) -> bool {
        self.input.is_none()
    }
}

fn read_game<R: Read>(input: &mut Input<R>, machine: &mut Machine) -> Result<Option<Game>, Cause> {
    trace!("reading game");
    loop {
        let pair = input.next_pair()?;
        match machine.step(pair)? {
            Flow::Continue => (),
            Flow::Game(game) => return Ok(Some(game)),
            Flow::EndOfStream => return Ok(None),
        }
    }
}

impl<R: Read> Drop for Reader<R> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<R: Read> Iterator for Reader<R> {
    type Item = Result<Game, Error>;

    /// Yields games until the end of the stream. Errors are yielded as
    /// items, so iteration can skip over malformed games. An I/O error
    /// releases the stream and ends iteration after it.
    fn next(&mut self) -> Option<Result<Game, Error>> {
        match self.read_game() {
            Ok(Some(game)) => Some(Ok(game)),
            Ok(None) | Err(Error::Released) => None,
            Err(err) => {
                if err.is_io() {
                    // The stream is not read any further.
                    self.release();
                }
                Some(Err(err))
            }
        }
    }
}
