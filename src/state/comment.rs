use super::Transition;
use crate::{buffer::Pair, config::Options, context::Context};

/// Text of a `{ ... }` or `; ...` comment.
#[derive(Debug, Default)]
pub(crate) struct Comment {
    text: String,
}

impl Comment {
    pub fn new() -> Comment {
        Comment::default()
    }

    pub fn on_enter(&mut self) {
        self.text.clear();
    }

    fn on_exit(&mut self, ctx: &mut Context) {
        let text = if ctx.options().contains(Options::TRIM_COMMENTS) {
            self.text.trim()
        } else {
            self.text.as_str()
        };
        ctx.add_comment(text.to_owned());
        self.text.clear();
    }

    pub fn parse_bracketed(&mut self, pair: Pair, ctx: &mut Context) -> Transition {
        if pair.is_end() {
            return Transition::Stay;
        }

        if pair.current == '}' {
            self.on_exit(ctx);
            Transition::Pop
        } else {
            self.text.push(pair.current);
            Transition::Stay
        }
    }

    /// Also ends at the end of the stream.
    pub fn parse_rest_of_line(&mut self, pair: Pair, ctx: &mut Context) -> Transition {
        if pair.is_end() || pair.current == '\n' {
            self.on_exit(ctx);
            Transition::Pop
        } else {
            self.text.push(pair.current);
            Transition::Stay
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{buffer::END, GameResult, Move};

    fn feed(comment: &mut Comment, ctx: &mut Context, s: &str, bracketed: bool) -> usize {
        let chars: Vec<char> = s.chars().collect();
        for (i, &current) in chars.iter().enumerate() {
            let pair = Pair {
                current,
                next: chars.get(i + 1).copied().unwrap_or(END),
                more: true,
            };
            let transition = if bracketed {
                comment.parse_bracketed(pair, ctx)
            } else {
                comment.parse_rest_of_line(pair, ctx)
            };
            if let Transition::Pop = transition {
                return i;
            }
        }
        chars.len()
    }

    #[test]
    fn test_bracketed() {
        let mut ctx = Context::new(Options::all());
        ctx.push_move(Move::new("e4"));
        let mut comment = Comment::new();
        assert_eq!(feed(&mut comment, &mut ctx, " best by test; 1-0 } e5", true), 19);
        let game = ctx.finish(GameResult::Unknown);
        assert_eq!(game.moves[0].comments, ["best by test; 1-0"]);
    }

    #[test]
    fn test_rest_of_line_at_end_of_stream() {
        let mut ctx = Context::new(Options::all());
        let mut comment = Comment::new();
        let pair = Pair {
            current: END,
            next: END,
            more: false,
        };
        assert!(matches!(comment.parse_rest_of_line(pair, &mut ctx), Transition::Pop));
        assert_eq!(ctx.finish(GameResult::Unknown).comments, [""]);
    }

    #[test]
    fn test_rest_of_line_untrimmed() {
        let mut ctx = Context::new(Options::empty());
        let mut comment = Comment::new();
        assert_eq!(feed(&mut comment, &mut ctx, " { not a brace }\r\n", false), 17);
        let game = ctx.finish(GameResult::Unknown);
        assert_eq!(game.comments, [" { not a brace }\r"]);
    }
}
