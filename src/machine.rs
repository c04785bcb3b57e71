use std::mem;

use tracing::{debug, trace};

use crate::{
    buffer::Pair,
    config::Options,
    context::Context,
    errors::StructureError,
    state::{State, Transition},
    Game,
};

#[derive(Debug)]
pub(crate) enum Flow {
    Continue,
    Game(Game),
    EndOfStream,
}

/// Dispatches pairs to the active [`State`] and applies the transitions it
/// requests.
///
/// Nested comments, annotations and variations suspend the enclosing state
/// on an explicit history stack, so nesting depth is bounded only by
/// memory.
#[derive(Debug)]
pub(crate) struct Machine {
    state: State,
    history: Vec<State>,
    context: Context,
}

impl Machine {
    pub fn new(options: Options) -> Machine {
        Machine {
            state: State::Initial,
            history: Vec::new(),
            context: Context::new(options),
        }
    }

    /// Number of suspended states.
    pub fn depth(&self) -> usize {
        self.history.len()
    }

    /// Discards the game in progress and waits for the next one.
    pub fn reset(&mut self) {
        self.state = State::Initial;
        self.history.clear();
        self.context = Context::new(self.context.options());
    }

    fn enter(&mut self, next: State) {
        trace!(from = self.state.name(), to = next.name(), "switch");
        self.state = next;
        self.state.on_enter();
    }

    pub fn step(&mut self, pair: Pair) -> Result<Flow, StructureError> {
        loop {
            match self.state.parse(pair, &mut self.context)? {
                Transition::Stay => (),
                Transition::Switch(next) => self.enter(next),
                Transition::Reprocess(next) => {
                    self.enter(next);
                    continue;
                }
                Transition::Push(next) => {
                    let suspended = mem::replace(&mut self.state, next);
                    trace!(
                        suspended = suspended.name(),
                        to = self.state.name(),
                        depth = self.history.len() + 1,
                        "push"
                    );
                    self.history.push(suspended);
                    self.state.on_enter();
                }
                Transition::Pop => {
                    let resumed = self
                        .history
                        .pop()
                        .ok_or(StructureError::UnbalancedNesting)?;
                    trace!(from = self.state.name(), resumed = resumed.name(), depth = self.history.len(), "pop");
                    self.state = resumed;
                    if pair.is_end() {
                        // Let the resumed state see the end of the stream.
                        continue;
                    }
                    // Leave the `[` of the next tag section unconsumed.
                    if matches!(self.state, State::MovesSection(_)) && pair.next == '[' {
                        return Err(StructureError::MissingResult);
                    }
                }
                Transition::EndOfGame(result) => {
                    if !self.history.is_empty() || self.context.depth() > 0 {
                        return Err(StructureError::UnclosedVariation);
                    }
                    let game = self.context.finish(result);
                    debug!(%result, tags = game.tags.len(), moves = game.moves.len(), "finished game");
                    self.state = State::Initial;
                    return Ok(Flow::Game(game));
                }
                Transition::EndOfStream => {
                    if !self.context.is_empty() {
                        debug!("discarding comments after the last game");
                        self.reset();
                    }
                    return Ok(Flow::EndOfStream);
                }
            }

            return if pair.is_end() {
                Err(StructureError::UnexpectedEof)
            } else {
                Ok(Flow::Continue)
            };
        }
    }
}
