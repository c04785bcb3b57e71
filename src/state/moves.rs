use std::mem;

use tracing::{trace, warn};

use super::{Annotation, Comment, State, Transition};
use crate::{
    buffer::{Pair, END},
    context::Context,
    errors::StructureError,
    GameResult, Move, Nag,
};

/// Ends a token when seen as lookahead.
fn is_delimiter(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, END | '.' | '{' | '}' | ';' | '(' | ')' | '$' | '[' | ']')
}

/// Move numbers, SAN, suffix glyphs and results. Opens comments,
/// annotations and variations.
#[derive(Debug, Default)]
pub(crate) struct MovesSection {
    token: String,
}

impl MovesSection {
    pub fn new() -> MovesSection {
        MovesSection::default()
    }

    pub fn on_enter(&mut self) {
        self.token.clear();
    }

    /// Commits the current token. Returns the result if the token was one.
    fn commit(&mut self, ctx: &mut Context) -> Option<GameResult> {
        if self.token.is_empty() {
            return None;
        }

        let token = mem::take(&mut self.token);
        if let Ok(result) = GameResult::from_ascii(token.as_bytes()) {
            return Some(result);
        }

        if token.bytes().all(|b| b.is_ascii_digit()) {
            // Move number.
            return None;
        }

        let san = token.trim_end_matches(['!', '?']);
        let glyph = &token[san.len()..];
        if !san.is_empty() {
            trace!(san, "move");
            ctx.push_move(Move::new(san));
        }
        if !glyph.is_empty() {
            ctx.annotate(glyph.to_owned(), Nag::from_ascii(glyph.as_bytes()).ok());
        }
        None
    }

    pub fn parse(&mut self, pair: Pair, ctx: &mut Context) -> Result<Transition, StructureError> {
        if pair.is_end() {
            return Ok(match self.commit(ctx) {
                Some(result) => Transition::EndOfGame(result),
                None => Transition::Stay,
            });
        }

        match pair.current {
            '{' => return Ok(Transition::Push(State::BracketComment(Comment::new()))),
            ';' => return Ok(Transition::Push(State::LineComment(Comment::new()))),
            '$' if pair.next.is_ascii_digit() => {
                return Ok(Transition::Push(State::Annotation(Annotation::new())));
            }
            '(' => {
                ctx.begin_variation()?;
                return Ok(Transition::Push(State::MovesSection(MovesSection::new())));
            }
            ')' => {
                ctx.end_variation()?;
                return Ok(Transition::Pop);
            }
            '[' => return Err(StructureError::MissingResult),
            ch @ ('$' | '}' | ']') => warn!(%ch, "stray character in movetext ignored"),
            ch if is_delimiter(ch) => (),
            ch => self.token.push(ch),
        }

        if !self.token.is_empty() && is_delimiter(pair.next) {
            if let Some(result) = self.commit(ctx) {
                return Ok(Transition::EndOfGame(result));
            }
        }

        if pair.next == '[' {
            return Err(StructureError::MissingResult);
        }

        Ok(Transition::Stay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Options;

    /// Feeds `s` to a single moves section, ignoring requested transitions
    /// other than the end of the game.
    fn feed(s: &str) -> (Context, Option<GameResult>) {
        let mut state = MovesSection::new();
        let mut ctx = Context::new(Options::all());
        let chars: Vec<char> = s.chars().collect();
        for (i, &current) in chars.iter().enumerate() {
            let pair = Pair {
                current,
                next: chars.get(i + 1).copied().unwrap_or(END),
                more: true,
            };
            if let Ok(Transition::EndOfGame(result)) = state.parse(pair, &mut ctx) {
                return (ctx, Some(result));
            }
        }
        (ctx, None)
    }

    #[test]
    fn test_tokens() {
        let (mut ctx, result) = feed("1.e4 e5 2. Nf3!? Nc6 3...a6 ?? 1/2-1/2 e4");
        assert_eq!(result, Some(GameResult::Draw));

        let game = ctx.finish(GameResult::Draw);
        let sans: Vec<&str> = game.moves.iter().map(|m| m.san.as_str()).collect();
        assert_eq!(sans, ["e4", "e5", "Nf3", "Nc6", "a6"]);
        assert_eq!(game.moves[2].annotation, "!?");
        assert_eq!(game.moves[2].nag, Some(Nag::SPECULATIVE_MOVE));
        assert_eq!(game.moves[4].annotation, "??");
    }

    #[test]
    fn test_result_at_end_of_stream() {
        for literal in crate::RESULTS {
            let (_, result) = feed(&format!("1. e4 {literal}"));
            assert_eq!(result.map(GameResult::as_str), Some(literal));
        }
    }

    #[test]
    fn test_castling_is_not_a_result() {
        let (mut ctx, result) = feed("1. O-O 0-0 *");
        assert_eq!(result, Some(GameResult::Unknown));
        let game = ctx.finish(GameResult::Unknown);
        assert_eq!(game.moves.len(), 2);
        assert_eq!(game.moves[1].san, "0-0");
    }

    #[test]
    fn test_missing_result() {
        let mut state = MovesSection::new();
        let mut ctx = Context::new(Options::all());
        let pair = Pair {
            current: '\n',
            next: '[',
            more: true,
        };
        assert_eq!(
            state.parse(pair, &mut ctx).map(|_| ()),
            Err(StructureError::MissingResult)
        );
    }
}
