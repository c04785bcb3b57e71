use std::{
    cmp,
    io::{self, Read},
    ops::Range,
    str,
};

use arrayvec::ArrayVec;
use tracing::trace;

use crate::config::{Config, Options};

/// Sentinel reported in place of a character past the end of the stream.
pub const END: char = '\0';

/// Longest UTF-8 encoding of a single character.
const MAX_CHAR_LEN: usize = 4;

const BOM: char = '\u{feff}';

/// A character and one character of lookahead.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Pair {
    pub current: char,
    /// [`END`] if `current` is the last character of the stream.
    pub next: char,
    /// `false` if `current` is the synthesized [`END`] sentinel.
    pub more: bool,
}

impl Pair {
    const fn end() -> Pair {
        Pair {
            current: END,
            next: END,
            more: false,
        }
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        !self.more
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Buffer {
    buffer: Box<[u8]>,
    /// The start of the valid data.
    ///
    /// Never greater than `self.end`.
    start: usize,
    /// The end of the valid data + 1 (not a valid index).
    ///
    /// Never greater than `self.buffer.len()`.
    end: usize,
    /// Maximum number of bytes requested per read.
    chunk: usize,
}

impl Buffer {
    fn new(chunk: usize) -> Buffer {
        Buffer {
            buffer: vec![0; cmp::max(chunk, MAX_CHAR_LEN)].into_boxed_slice(),
            start: 0,
            end: 0,
            chunk,
        }
    }

    #[inline]
    fn data_len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    fn data_range(&self) -> Range<usize> {
        self.start..self.end
    }

    #[inline]
    fn data(&self) -> &[u8] {
        &self.buffer[self.data_range()]
    }

    /// Discards `n` many bytes at the front of [`Self::data`].
    #[inline]
    fn consume(&mut self, n: usize) {
        self.start = cmp::min(self.start + n, self.end);
    }

    /// Ensures that `n` bytes are in the buffer and returns the data.
    ///
    /// The only situation where the returned slice has fewer than `n` bytes
    /// is if EOF was encountered.
    fn ensure_bytes(&mut self, n: usize, mut r: impl Read) -> io::Result<&[u8]> {
        debug_assert!(n <= self.buffer.len());

        if self.end + n > self.buffer.len() {
            self.backshift();
        }

        while self.data_len() < n {
            let limit = cmp::min(self.end + self.chunk, self.buffer.len());
            let len = match r.read(&mut self.buffer[self.end..limit]) {
                Ok(len) => len,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            };

            // EOF
            if len == 0 {
                break;
            }

            trace!(len, "refilled buffer");
            self.end += len;
        }

        Ok(self.data())
    }

    /// Moves [`Self::data`] to the beginning.
    fn backshift(&mut self) {
        let data_range = self.data_range();
        self.start = 0;
        self.end = data_range.len();
        self.buffer.copy_within(data_range, 0);
    }
}

fn utf8_len(lead: u8) -> usize {
    match lead {
        0xc0..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf7 => 4,
        _ => 1,
    }
}

/// Decodes characters from a source and hands them out as [`Pair`]s.
///
/// Refill boundaries are invisible to the caller: a character split across
/// two reads is stitched together, and the lookahead may come from a chunk
/// that has not been read when the current character was decoded.
#[derive(Debug)]
pub(crate) struct Input<R> {
    buffer: Buffer,
    reader: R,
    options: Options,
    /// Decoded characters not yet handed out. Holds the lookahead between
    /// calls to [`Input::next_pair`].
    window: ArrayVec<char, 2>,
    stream_start: bool,
    line_start: bool,
}

impl<R: Read> Input<R> {
    pub fn new(reader: R, config: &Config) -> Input<R> {
        Input {
            buffer: Buffer::new(config.buffer_size.get()),
            reader,
            options: config.options,
            window: ArrayVec::new(),
            stream_start: true,
            line_start: true,
        }
    }

    /// Returns the next character together with its lookahead.
    ///
    /// Keeps returning the [`END`] sentinel once the source is exhausted.
    pub fn next_pair(&mut self) -> io::Result<Pair> {
        while !self.window.is_full() {
            match self.decode()? {
                Some(ch) => self.window.push(ch),
                None => break,
            }
        }

        let Some(current) = self.window.pop_at(0) else {
            return Ok(Pair::end());
        };

        Ok(Pair {
            current,
            next: self.window.first().copied().unwrap_or(END),
            more: true,
        })
    }

    fn decode(&mut self) -> io::Result<Option<char>> {
        let mut escaped = false;

        loop {
            let Some(ch) = self.decode_char()? else {
                return Ok(None);
            };

            let stream_start = self.stream_start;
            self.stream_start = false;

            if stream_start && ch == BOM && self.options.contains(Options::SKIP_BOM) {
                continue;
            }

            if escaped && ch != '\n' {
                continue;
            }

            if self.line_start && ch == '%' && self.options.contains(Options::ESCAPE_LINES) {
                escaped = true;
                self.line_start = false;
                continue;
            }

            self.line_start = ch == '\n';
            return Ok(Some(ch));
        }
    }

    fn decode_char(&mut self) -> io::Result<Option<char>> {
        let lead = match self.buffer.ensure_bytes(1, &mut self.reader)?.first() {
            Some(&lead) => lead,
            None => return Ok(None),
        };

        if lead.is_ascii() {
            self.buffer.consume(1);
            return Ok(Some(char::from(lead)));
        }

        let len = utf8_len(lead);
        let (ch, consumed) = {
            let data = self.buffer.ensure_bytes(len, &mut self.reader)?;
            match data.get(..len).map(str::from_utf8) {
                Some(Ok(s)) => (s.chars().next().unwrap_or(char::REPLACEMENT_CHARACTER), len),
                _ => (char::REPLACEMENT_CHARACTER, 1),
            }
        };

        self.buffer.consume(consumed);
        Ok(Some(ch))
    }
}

#[cfg(test)]
mod tests {
    use std::{io::Cursor, num::NonZeroUsize};

    use super::*;

    fn input(data: &[u8], buffer_size: usize, options: Options) -> Input<Cursor<&[u8]>> {
        let config = Config::default()
            .buffer_size(NonZeroUsize::new(buffer_size).expect("non-zero"))
            .options(options);
        Input::new(Cursor::new(data), &config)
    }

    fn collect(mut input: Input<Cursor<&[u8]>>) -> Vec<(char, char)> {
        let mut pairs = Vec::new();
        loop {
            let pair = input.next_pair().expect("read");
            if pair.is_end() {
                return pairs;
            }
            pairs.push((pair.current, pair.next));
        }
    }

    #[test]
    fn test_pairs() {
        let pairs = collect(input(b"e4 *", 4096, Options::empty()));
        assert_eq!(pairs, [('e', '4'), ('4', ' '), (' ', '*'), ('*', END)]);
    }

    #[test]
    fn test_refill_boundaries() {
        let data = "1. e4 { Käse über alles } (1. d4) 1-0".as_bytes();
        let expected = collect(input(data, 4096, Options::all()));
        for size in 1..8 {
            assert_eq!(collect(input(data, size, Options::all())), expected, "size {size}");
        }
    }

    #[test]
    fn test_end_is_sticky() {
        let mut input = input(b"", 1, Options::empty());
        assert!(input.next_pair().expect("read").is_end());
        assert!(input.next_pair().expect("read").is_end());
    }

    #[test]
    fn test_invalid_utf8() {
        let pairs = collect(input(b"a\xffb", 1, Options::empty()));
        assert_eq!(
            pairs,
            [
                ('a', char::REPLACEMENT_CHARACTER),
                (char::REPLACEMENT_CHARACTER, 'b'),
                ('b', END)
            ]
        );
    }

    #[test]
    fn test_bom() {
        let data = "\u{feff}*".as_bytes();
        assert_eq!(collect(input(data, 2, Options::SKIP_BOM)), [('*', END)]);
        assert_eq!(collect(input(data, 2, Options::empty())), [(BOM, '*'), ('*', END)]);
    }

    #[test]
    fn test_escape_lines() {
        let data = b"%ignored\n*\n% also\n";
        assert_eq!(
            collect(input(data, 3, Options::ESCAPE_LINES)),
            [('\n', '*'), ('*', '\n'), ('\n', '\n'), ('\n', END)]
        );

        // Only at the start of a line.
        assert_eq!(
            collect(input(b"a%", 3, Options::ESCAPE_LINES)),
            [('a', '%'), ('%', END)]
        );
    }

    #[test]
    fn test_interrupted_read_is_retried() {
        struct Flaky {
            interrupted: bool,
        }

        impl Read for Flaky {
            fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
                if !self.interrupted {
                    self.interrupted = true;
                    return Err(io::ErrorKind::Interrupted.into());
                }
                buf[0] = b'*';
                Ok(1)
            }
        }

        let mut input = Input::new(Flaky { interrupted: false }, &Config::default());
        let pair = input.next_pair().expect("read");
        assert_eq!((pair.current, pair.next), ('*', '*'));
    }
}
