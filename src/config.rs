use std::num::NonZeroUsize;

use bitflags::bitflags;

/// Number of bytes requested from the source per refill, unless configured
/// otherwise.
pub const DEFAULT_BUFFER_SIZE: NonZeroUsize = match NonZeroUsize::new(0x1000) {
    Some(size) => size,
    None => panic!("buffer size must not be zero"),
};

bitflags! {
    /// Lexical conveniences applied while reading.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct Options: u8 {
        /// Skip a UTF-8 byte order mark at the very start of the stream.
        const SKIP_BOM = 1 << 0;
        /// Ignore lines starting with `%`, the escape mechanism of the PGN
        /// standard.
        const ESCAPE_LINES = 1 << 1;
        /// Trim leading and trailing whitespace from comments.
        const TRIM_COMMENTS = 1 << 2;
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Config {
    /// Maximum number of bytes requested from the source per refill.
    ///
    /// Defaults to [`DEFAULT_BUFFER_SIZE`] (4096). Parsed games do not depend
    /// on this value.
    pub buffer_size: NonZeroUsize,
    /// Defaults to [`Options::all()`].
    pub options: Options,
}

impl Config {
    pub fn buffer_size(mut self, buffer_size: NonZeroUsize) -> Config {
        self.buffer_size = buffer_size;
        self
    }

    pub fn options(mut self, options: Options) -> Config {
        self.options = options;
        self
    }
}

impl Default for Config {
    fn default() -> Config {
        Config {
            buffer_size: DEFAULT_BUFFER_SIZE,
            options: Options::all(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = Config::default();
        assert_eq!(config.buffer_size.get(), 4096);
        assert!(config.options.contains(Options::TRIM_COMMENTS));
        assert!(config.options.contains(Options::SKIP_BOM | Options::ESCAPE_LINES));
    }

    #[test]
    fn test_builder() {
        let config = Config::default()
            .buffer_size(NonZeroUsize::MIN)
            .options(Options::SKIP_BOM);
        assert_eq!(config.buffer_size, NonZeroUsize::MIN);
        assert_eq!(config.options, Options::SKIP_BOM);
    }
}
