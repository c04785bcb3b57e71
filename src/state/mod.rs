//! Parsing states of the machine.
//!
//! Each state owns a scoped buffer. It is reset when the state is entered and
//! committed into the [`Context`] when the state exits. A state never
//! switches by itself: it returns a [`Transition`] and the machine applies it.

mod annotation;
mod comment;
mod moves;
mod tags;

pub(crate) use annotation::Annotation;
pub(crate) use comment::Comment;
pub(crate) use moves::MovesSection;
pub(crate) use tags::TagSection;

use crate::{
    buffer::{Pair, END},
    context::Context,
    errors::StructureError,
    GameResult,
};

#[derive(Debug)]
pub(crate) enum State {
    /// Between games. Skips whitespace and opens comments.
    Initial,
    TagSection(TagSection),
    MovesSection(MovesSection),
    /// `; ...` up to the end of the line.
    LineComment(Comment),
    /// `{ ... }`.
    BracketComment(Comment),
    /// `$` followed by decimal digits.
    Annotation(Annotation),
}

/// What the machine should do after a state has seen a [`Pair`].
#[derive(Debug)]
pub(crate) enum Transition {
    Stay,
    /// Replace the active state.
    Switch(State),
    /// Replace the active state and let it see the same pair again.
    Reprocess(State),
    /// Suspend the active state on the history stack and activate a nested
    /// one.
    Push(State),
    /// Drop the active state and resume the one on top of the history
    /// stack.
    Pop,
    EndOfGame(GameResult),
    EndOfStream,
}

impl State {
    pub fn name(&self) -> &'static str {
        match self {
            State::Initial => "initial",
            State::TagSection(_) => "tag-section",
            State::MovesSection(_) => "moves-section",
            State::LineComment(_) => "line-comment",
            State::BracketComment(_) => "bracket-comment",
            State::Annotation(_) => "annotation",
        }
    }

    pub fn on_enter(&mut self) {
        match self {
            State::Initial => (),
            State::TagSection(state) => state.on_enter(),
            State::MovesSection(state) => state.on_enter(),
            State::LineComment(state) | State::BracketComment(state) => state.on_enter(),
            State::Annotation(state) => state.on_enter(),
        }
    }

    pub fn parse(&mut self, pair: Pair, ctx: &mut Context) -> Result<Transition, StructureError> {
        Ok(match self {
            State::Initial => parse_initial(pair),
            State::TagSection(state) => state.parse(pair, ctx),
            State::MovesSection(state) => return state.parse(pair, ctx),
            State::LineComment(state) => state.parse_rest_of_line(pair, ctx),
            State::BracketComment(state) => state.parse_bracketed(pair, ctx),
            State::Annotation(state) => state.parse(pair, ctx),
        })
    }
}

fn parse_initial(pair: Pair) -> Transition {
    if pair.is_end() {
        return Transition::EndOfStream;
    }

    match pair.current {
        // Comments between games belong to the following game.
        '{' => Transition::Push(State::BracketComment(Comment::new())),
        ';' => Transition::Push(State::LineComment(Comment::new())),
        ch if ch.is_whitespace() => match pair.next {
            '[' => Transition::Switch(State::TagSection(TagSection::new())),
            '{' | ';' => Transition::Stay,
            next if next == END || next.is_whitespace() => Transition::Stay,
            _ => Transition::Switch(State::MovesSection(MovesSection::new())),
        },
        '[' => Transition::Reprocess(State::TagSection(TagSection::new())),
        _ => Transition::Reprocess(State::MovesSection(MovesSection::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(current: char, next: char) -> Pair {
        Pair {
            current,
            next,
            more: true,
        }
    }

    #[test]
    fn test_initial_switches_on_lookahead() {
        assert!(matches!(parse_initial(pair(' ', ' ')), Transition::Stay));
        assert!(matches!(
            parse_initial(pair('\n', '[')),
            Transition::Switch(State::TagSection(_))
        ));
        assert!(matches!(
            parse_initial(pair(' ', '1')),
            Transition::Switch(State::MovesSection(_))
        ));
        assert!(matches!(
            parse_initial(pair('[', 'E')),
            Transition::Reprocess(State::TagSection(_))
        ));
        assert!(matches!(parse_initial(pair('\n', '{')), Transition::Stay));
        assert!(matches!(
            parse_initial(pair('{', 'c')),
            Transition::Push(State::BracketComment(_))
        ));
        assert!(matches!(
            parse_initial(pair(';', ' ')),
            Transition::Push(State::LineComment(_))
        ));
        assert!(matches!(
            parse_initial(Pair {
                current: END,
                next: END,
                more: false
            }),
            Transition::EndOfStream
        ));
    }
}
