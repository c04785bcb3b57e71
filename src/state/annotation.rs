use super::Transition;
use crate::{buffer::Pair, context::Context, nag, Nag};

/// Digits of a numeric annotation glyph like `$14`.
#[derive(Debug, Default)]
pub(crate) struct Annotation {
    digits: String,
}

impl Annotation {
    pub fn new() -> Annotation {
        Annotation::default()
    }

    pub fn on_enter(&mut self) {
        self.digits.clear();
    }

    fn on_exit(&mut self, ctx: &mut Context) {
        let code = self.digits.trim();
        // Only canonical codes name a glyph: `$03` is not `$3`.
        let nag = match code.as_bytes() {
            [b'0', _, ..] => None,
            digits => btoi::btou(digits).ok().map(Nag),
        };
        ctx.annotate(nag::annotation(code).into_owned(), nag);
        self.digits.clear();
    }

    pub fn parse(&mut self, pair: Pair, ctx: &mut Context) -> Transition {
        if pair.is_end() {
            return Transition::Stay;
        }

        self.digits.push(pair.current);
        if pair.next.is_ascii_digit() {
            Transition::Stay
        } else {
            self.on_exit(ctx);
            Transition::Pop
        }
    }
}
