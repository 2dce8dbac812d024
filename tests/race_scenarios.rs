//! End-to-end races: raw protocol bytes through the line reader and the
//! coordinator, checked through the public API.

use std::time::{Duration, Instant};

use morse_race::game::{LineOutcome, LineReader, Outcome, Race, Rejected, TargetWord};
use morse_race::transport::{spawn_reader, ScriptedSource, TransportEvent};
use morse_race::ui::Standings;

/// Encode a Morse code for `slot` as protocol lines.
fn keyed(slot: usize, code: &str) -> Vec<u8> {
    let mut out = Vec::new();
    for c in code.chars() {
        let sym = if c == '.' { 'S' } else { 'L' };
        out.extend_from_slice(format!("U{slot}:{sym}\r\n").as_bytes());
    }
    out
}

/// Feed `bytes` through a fresh reader at a fixed time; collect line outcomes.
fn feed(race: &mut Race, reader: &mut LineReader, bytes: &[u8], now: Instant) -> Vec<LineOutcome> {
    bytes
        .iter()
        .filter_map(|&b| race.on_byte(reader, b, now))
        .collect()
}

fn new_race(word: &str) -> (Race, LineReader) {
    (Race::new(TargetWord::normalize(word).unwrap()), LineReader::new())
}

#[test_log::test]
fn sos_finishes_with_rank_one() {
    let (mut race, mut reader) = new_race("SOS");
    let start = Instant::now();

    feed(&mut race, &mut reader, &keyed(0, "..."), start);
    feed(&mut race, &mut reader, &keyed(0, "---"), start);
    let outcomes = feed(&mut race, &mut reader, &keyed(0, "..."), start + Duration::from_secs(4));

    let player = race.player(0).unwrap();
    assert_eq!(player.confirmed(), 3);
    assert_eq!(player.mistakes(), 0);
    let finish = player.finish().expect("player 0 finished");
    assert_eq!(finish.rank, 1);
    assert_eq!(finish.elapsed, Duration::from_secs(4));
    assert!(matches!(outcomes.last(), Some(LineOutcome::Finished { slot: 0, .. })));
}

#[test_log::test]
fn four_dots_from_the_start_confirm_s_then_buffer_one() {
    // Exact-length matching confirms S on the third dot; the fourth starts O.
    let (mut race, mut reader) = new_race("SOS");
    let outcomes = feed(&mut race, &mut reader, &keyed(0, "...."), Instant::now());

    let applied: Vec<Outcome> = outcomes
        .iter()
        .map(|o| match o {
            LineOutcome::Applied { outcome, .. } => *outcome,
            other => panic!("unexpected {other:?}"),
        })
        .collect();
    assert_eq!(
        applied,
        vec![Outcome::NoOp, Outcome::NoOp, Outcome::LetterConfirmed, Outcome::NoOp]
    );
    let player = race.player(0).unwrap();
    assert_eq!(player.confirmed(), 1);
    assert_eq!(player.pending().notation(), ".");
}

#[test_log::test]
fn four_dots_against_o_is_a_mistake() {
    let (mut race, mut reader) = new_race("SOS");
    let now = Instant::now();
    feed(&mut race, &mut reader, &keyed(0, "..."), now);
    let outcomes = feed(&mut race, &mut reader, &keyed(0, "...."), now);

    assert_eq!(
        outcomes.last(),
        Some(&LineOutcome::Applied { slot: 0, outcome: Outcome::Mistake })
    );
    let player = race.player(0).unwrap();
    assert_eq!(player.mistakes(), 1);
    assert!(player.pending().is_empty());
}

#[test_log::test]
fn bad_marker_and_slot_change_nothing() {
    let (mut race, mut reader) = new_race("SOS");
    let before = race.players().clone();

    let outcomes = feed(&mut race, &mut reader, b"Q5:S\nU5:S\nU4:L\n", Instant::now());
    assert_eq!(
        outcomes,
        vec![
            LineOutcome::Ignored(Rejected::Marker),
            LineOutcome::Ignored(Rejected::SlotRange(5)),
            LineOutcome::Ignored(Rejected::SlotRange(4)),
        ]
    );
    assert!(outcomes.iter().all(LineOutcome::refreshes_view));
    assert_eq!(race.players(), &before);
    assert_eq!(race.started_at(), None);
}

#[test_log::test]
fn overlong_line_dropped_next_line_applies() {
    let (mut race, mut reader) = new_race("E");
    let mut bytes = vec![b'U'; 40];
    bytes.push(b'\n');
    bytes.extend_from_slice(b"U0:S\n");

    let outcomes = feed(&mut race, &mut reader, &bytes, Instant::now());
    assert_eq!(outcomes.len(), 1);
    assert!(matches!(outcomes[0], LineOutcome::Finished { slot: 0, .. }));
}

#[test_log::test]
fn first_processed_player_ranks_higher() {
    let (mut race, mut reader) = new_race("TE");
    let now = Instant::now();

    // Interleave two players symbol by symbol; player 2 is always first.
    let mut bytes = Vec::new();
    for code in ["-", "."] {
        bytes.extend(keyed(2, code));
        bytes.extend(keyed(1, code));
    }
    feed(&mut race, &mut reader, &bytes, now);

    assert_eq!(race.player(2).unwrap().finish().unwrap().rank, 1);
    assert_eq!(race.player(1).unwrap().finish().unwrap().rank, 2);
    assert!(race.player(0).unwrap().finish().is_none());
}

#[test_log::test]
fn ranks_unique_across_full_race() {
    let (mut race, mut reader) = new_race("PARIS");
    let start = Instant::now();
    let order = [3usize, 0, 2, 1];
    let codes = [".--.", ".-", ".-.", "..", "..."];

    for (i, &slot) in order.iter().enumerate() {
        let mut bytes = Vec::new();
        for code in codes {
            bytes.extend(keyed(slot, code));
        }
        feed(&mut race, &mut reader, &bytes, start + Duration::from_secs(i as u64 + 1));
    }

    assert!(race.is_complete());
    let mut ranks: Vec<usize> = race.players().iter().map(|p| p.finish().unwrap().rank).collect();
    assert_eq!(ranks[3], 1);
    assert_eq!(ranks[1], 4);
    ranks.sort_unstable();
    assert_eq!(ranks, vec![1, 2, 3, 4]);
}

#[test_log::test]
fn replay_through_reader_thread() {
    let mut script = keyed(0, "-");
    script.extend(b"garbage\n");
    script.extend(keyed(1, "-"));
    let (handle, rx) = spawn_reader(ScriptedSource::new(script));

    let (mut race, mut reader) = new_race("T");
    let now = Instant::now();
    let mut refreshes = 0;
    for event in rx.iter() {
        match event {
            TransportEvent::Byte(b) => {
                if let Some(outcome) = race.on_byte(&mut reader, b, now) {
                    if outcome.refreshes_view() {
                        refreshes += 1;
                    }
                }
            }
            TransportEvent::Stopped(_) => break,
        }
    }
    handle.stop();

    assert_eq!(refreshes, 3);
    assert_eq!(race.player(0).unwrap().finish().unwrap().rank, 1);
    assert_eq!(race.player(1).unwrap().finish().unwrap().rank, 2);

    let view = Standings::project(race.players(), race.target(), race.elapsed(now));
    assert_eq!(view, Standings::project(race.players(), race.target(), race.elapsed(now)));
}
