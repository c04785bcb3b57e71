use std::mem;

use tracing::warn;

use crate::{config::Options, errors::StructureError, Game, GameResult, Move, Nag, Tags};

/// A sequence of moves under construction: the mainline or an open
/// variation.
#[derive(Debug, Default)]
struct Line {
    moves: Vec<Move>,
    /// Comments seen before the first move of a variation.
    pending_comments: Vec<String>,
}

/// The game being built. Parsing states commit into it.
///
/// The current move is always the last move of the innermost open line.
#[derive(Debug)]
pub(crate) struct Context {
    options: Options,
    tags: Tags,
    comments: Vec<String>,
    mainline: Line,
    variations: Vec<Line>,
}

impl Context {
    pub fn new(options: Options) -> Context {
        Context {
            options,
            tags: Tags::new(),
            comments: Vec::new(),
            mainline: Line::default(),
            variations: Vec::new(),
        }
    }

    pub fn options(&self) -> Options {
        self.options
    }

    fn line_mut(&mut self) -> &mut Line {
        match self.variations.last_mut() {
            Some(line) => line,
            None => &mut self.mainline,
        }
    }

    fn current_move(&mut self) -> Option<&mut Move> {
        self.line_mut().moves.last_mut()
    }

    pub fn add_tag(&mut self, name: String, value: String) {
        self.tags.insert(name, value);
    }

    pub fn push_move(&mut self, mut m: Move) {
        let line = self.line_mut();
        m.comments.append(&mut line.pending_comments);
        line.moves.push(m);
    }

    pub fn add_comment(&mut self, comment: String) {
        if let Some(m) = self.current_move() {
            m.comments.push(comment);
        } else if self.variations.is_empty() {
            self.comments.push(comment);
        } else {
            self.line_mut().pending_comments.push(comment);
        }
    }

    /// Annotates the current move, replacing any previous annotation.
    pub fn annotate(&mut self, annotation: String, nag: Option<Nag>) {
        match self.current_move() {
            Some(m) => {
                m.annotation = annotation;
                m.nag = nag;
            }
            None => warn!(%annotation, "annotation before first move ignored"),
        }
    }

    /// Opens a variation branching from the current move.
    pub fn begin_variation(&mut self) -> Result<(), StructureError> {
        if self.current_move().is_none() {
            return Err(StructureError::VariationWithoutMove);
        }
        self.variations.push(Line::default());
        Ok(())
    }

    /// Closes the innermost variation and attaches it to the move it
    /// branches from.
    pub fn end_variation(&mut self) -> Result<(), StructureError> {
        let mut line = self
            .variations
            .pop()
            .ok_or(StructureError::UnbalancedNesting)?;
        match self.current_move() {
            Some(m) => {
                m.comments.append(&mut line.pending_comments);
                if !line.moves.is_empty() {
                    m.variations.push(line.moves);
                }
            }
            None => warn!("variation without preceding move dropped"),
        }
        Ok(())
    }

    /// `true` if nothing has been committed since the last game.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
            && self.comments.is_empty()
            && self.mainline.moves.is_empty()
            && self.variations.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.variations.len()
    }

    /// Hands out the finished game and leaves an empty context behind.
    pub fn finish(&mut self, result: GameResult) -> Game {
        debug_assert!(self.variations.is_empty());
        let options = self.options;
        let finished = mem::replace(self, Context::new(options));
        Game {
            tags: finished.tags,
            comments: finished.comments,
            moves: finished.mainline.moves,
            result,
        }
    }
}
