use tracing::trace;

use super::{MovesSection, State, Transition};
use crate::{
    buffer::{Pair, END},
    context::Context,
    tag,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Phase {
    /// Between tag pairs.
    Outside,
    Name,
    BeforeValue,
    Value,
    /// After a backslash inside the value.
    Escape,
    AfterValue,
}

/// Tag pairs like `[White "Deep Blue"]`.
#[derive(Debug)]
pub(crate) struct TagSection {
    phase: Phase,
    name: String,
    /// Raw value, escape sequences included.
    value: String,
}

impl TagSection {
    pub fn new() -> TagSection {
        TagSection {
            phase: Phase::Outside,
            name: String::new(),
            value: String::new(),
        }
    }

    pub fn on_enter(&mut self) {
        self.phase = Phase::Outside;
        self.name.clear();
        self.value.clear();
    }

    fn on_exit(&mut self, ctx: &mut Context) {
        if !self.name.is_empty() {
            let value = tag::unescape(&self.value).into_owned();
            trace!(name = %self.name, %value, "tag");
            ctx.add_tag(self.name.clone(), value);
        }
        self.on_enter();
    }

    pub fn parse(&mut self, pair: Pair, ctx: &mut Context) -> Transition {
        if pair.is_end() {
            return Transition::Stay;
        }

        let ch = pair.current;
        match self.phase {
            Phase::Outside => {
                if ch == '[' {
                    self.phase = Phase::Name;
                }
            }
            Phase::Name => match ch {
                '"' => self.phase = Phase::Value,
                ']' => self.on_exit(ctx),
                ch if ch.is_whitespace() => {
                    if !self.name.is_empty() {
                        self.phase = Phase::BeforeValue;
                    }
                }
                ch => self.name.push(ch),
            },
            Phase::BeforeValue => match ch {
                '"' => self.phase = Phase::Value,
                ']' => self.on_exit(ctx),
                _ => (),
            },
            Phase::Value => match ch {
                '\\' => {
                    self.value.push(ch);
                    self.phase = Phase::Escape;
                }
                '"' => self.phase = Phase::AfterValue,
                ch => self.value.push(ch),
            },
            Phase::Escape => {
                self.value.push(ch);
                self.phase = Phase::Value;
            }
            Phase::AfterValue => {
                if ch == ']' {
                    self.on_exit(ctx);
                }
            }
        }

        // Movetext starts with the first non-space character after a tag pair
        // that does not open another one.
        if self.phase == Phase::Outside
            && pair.next != '['
            && pair.next != END
            && !pair.next.is_whitespace()
        {
            Transition::Switch(State::MovesSection(MovesSection::new()))
        } else {
            Transition::Stay
        }
    }
}
