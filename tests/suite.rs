use std::{collections::HashMap, fs::File, io::BufReader};

use pgn_machine::{Game, GameResult, Reader};
use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr};

#[serde_as]
#[derive(Deserialize)]
struct Record {
    fixture: String,
    index: usize,
    event: Option<String>,
    white: Option<String>,
    moves: usize,
    variations: usize,
    comments: usize,
    #[serde_as(as = "DisplayFromStr")]
    result: GameResult,
}

fn read_fixture(name: &str) -> Vec<Game> {
    let file = File::open(format!("tests/fixtures/{name}")).expect("fixture");
    Reader::new(BufReader::new(file))
        .collect::<Result<_, _>>()
        .unwrap_or_else(|err| panic!("{name}: {err:?}"))
}

#[test]
fn test_fixtures() {
    let mut fixtures: HashMap<String, Vec<Game>> = HashMap::new();
    let mut expected_games: HashMap<String, usize> = HashMap::new();

    let mut reader = csv::Reader::from_path("tests/suite.csv").expect("reader");
    for (i, record) in reader.deserialize().enumerate() {
        let record: Record = record.expect("record");
        let games = fixtures
            .entry(record.fixture.clone())
            .or_insert_with(|| read_fixture(&record.fixture));
        *expected_games.entry(record.fixture.clone()).or_default() += 1;

        let game = &games[record.index];
        let line = i + 2;
        assert_eq!(game.tag("Event"), record.event.as_deref(), "line {line}");
        assert_eq!(game.tag("White"), record.white.as_deref(), "line {line}");
        assert_eq!(game.moves.len(), record.moves, "line {line}");
        assert_eq!(
            game.moves.iter().map(|m| m.variations.len()).sum::<usize>(),
            record.variations,
            "line {line}"
        );
        assert_eq!(
            game.comments.len() + game.moves.iter().map(|m| m.comments.len()).sum::<usize>(),
            record.comments,
            "line {line}"
        );
        assert_eq!(game.result, record.result, "line {line}");
    }

    for (fixture, games) in &fixtures {
        assert_eq!(games.len(), expected_games[fixture], "{fixture}");
    }
}

#[test]
fn test_san_is_syntactically_valid() {
    for fixture in ["annotated.pgn", "unusual.pgn"] {
        for game in read_fixture(fixture) {
            for m in &game.moves {
                assert!(m.san_plus().is_ok(), "{fixture}: {}", m.san);
            }
        }
    }
}

#[test]
fn test_result_tag_matches_result() {
    for game in read_fixture("annotated.pgn") {
        let tag: GameResult = game.tag("Result").expect("result tag").parse().expect("valid result");
        assert_eq!(tag, game.result);
        assert!(game.result.winner().is_some());
    }
}
