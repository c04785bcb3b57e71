#![no_main]

use std::{fmt, num::NonZeroUsize};

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pgn_machine::{Config, Error, Game, Options, Reader};

#[derive(Arbitrary)]
struct TestCase {
    pgn: Vec<u8>,
    buffer_size: u8,
    options: u8,
}

impl fmt::Debug for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase")
            .field("pgn", &String::from_utf8_lossy(&self.pgn))
            .field("buffer_size", &self.buffer_size)
            .field("options", &self.options)
            .finish()
    }
}

/// Reads every game, keeping errors other than I/O errors, which cannot
/// happen on a slice.
fn read_all(pgn: &[u8], config: Config) -> Vec<Result<Game, String>> {
    Reader::with_config(pgn, config)
        .take(1000)
        .map(|game| {
            game.map_err(|err| match err {
                Error::Parse(cause) => cause.to_string(),
                Error::Released => unreachable!("reader released"),
            })
        })
        .collect()
}

fuzz_target!(|data: TestCase| {
    let options = Options::from_bits_truncate(data.options);
    let buffer_size = NonZeroUsize::new(usize::from(data.buffer_size)).unwrap_or(NonZeroUsize::MIN);

    // Games do not depend on how the source splits its reads.
    let left = read_all(&data.pgn, Config::default().options(options));
    let right = read_all(
        &data.pgn,
        Config::default().options(options).buffer_size(buffer_size),
    );
    assert_eq!(left, right);
});
