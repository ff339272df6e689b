use std::sync::Arc;

use super::*;
use crate::catalog::{Track, TrackList, share};
use crate::error::Error;

fn t(id: &str, title: &str, artist: &str) -> Track {
    Track {
        id: id.into(),
        title: title.into(),
        artist: artist.into(),
        album: None,
        duration: None,
        preview: None,
        artwork: None,
        display: format!("{artist} - {title}"),
    }
}

fn two_tracks() -> TrackList {
    share(vec![t("a", "Song1", "ArtistX"), t("b", "Song2", "ArtistY")])
}

fn first(_: usize) -> usize {
    0
}

fn last(len: usize) -> usize {
    len - 1
}

fn round_targeting_a() -> (GuessRound, Arc<Track>, Arc<Track>) {
    let tracks = two_tracks();
    let a = Arc::clone(&tracks[0]);
    let b = Arc::clone(&tracks[1]);
    let round = GuessRound::with_picker(tracks, Rules::default(), first).unwrap();
    (round, a, b)
}

#[test]
fn new_round_refuses_empty_track_list() {
    let empty: TrackList = share(Vec::new());
    let err = GuessRound::new(empty, Rules::default()).unwrap_err();
    assert!(matches!(err, Error::InsufficientData));
}

#[test]
fn random_target_is_always_a_member() {
    let tracks = share(
        (0..7)
            .map(|i| t(&i.to_string(), &format!("Song{i}"), "Band"))
            .collect(),
    );
    for _ in 0..200 {
        let round = GuessRound::new(tracks.clone(), Rules::default()).unwrap();
        assert!(tracks.iter().any(|tr| tr.id == round.target().id));
    }
}

#[test]
fn fresh_round_starts_clean() {
    let (round, a, _) = round_targeting_a();
    assert_eq!(round.target().id, a.id);
    assert!(round.log().is_empty());
    assert_eq!(round.turns_used(), 0);
    assert_eq!(round.turns_left(), 6);
    assert_eq!(round.allowed_playback_secs(), 3);
    assert_eq!(round.allowed_playback(), std::time::Duration::from_secs(3));
    assert_eq!(round.outcome(), Outcome::InProgress);
    assert_eq!(round.verdict(), None);
}

#[test]
fn wrong_then_right_wins_on_turn_two() {
    let (mut round, a, b) = round_targeting_a();

    assert_eq!(round.submit_guess(&b), Outcome::InProgress);
    assert_eq!(round.log(), &[Guess::Incorrect(Arc::clone(&b))]);
    assert_eq!(round.turns_used(), 1);

    assert_eq!(round.submit_guess(&a), Outcome::Won(2));
    assert_eq!(
        round.log(),
        &[Guess::Incorrect(Arc::clone(&b)), Guess::Correct(Arc::clone(&a))]
    );
    assert_eq!(round.turns_used(), 2);
    assert_eq!(round.verdict(), Some(Verdict::GuessedIn(2)));
}

#[test]
fn six_wrong_guesses_lose() {
    let (mut round, _, b) = round_targeting_a();
    for turn in 1..=6 {
        let outcome = round.submit_guess(&b);
        assert_eq!(round.turns_used(), turn);
        assert!(!matches!(outcome, Outcome::Won(_)));
    }
    assert_eq!(round.outcome(), Outcome::Lost);
    assert_eq!(round.turns_used(), 6);
    assert_eq!(round.verdict(), Some(Verdict::TimeUp));
}

#[test]
fn guesses_after_a_win_are_ignored() {
    let (mut round, a, b) = round_targeting_a();
    round.submit_guess(&a);
    assert_eq!(round.outcome(), Outcome::Won(1));
    assert!(round.outcome().is_over());

    assert_eq!(round.submit_guess(&b), Outcome::Won(1));
    assert_eq!(round.submit_guess(&a), Outcome::Won(1));
    assert_eq!(round.turns_used(), 1);
}

#[test]
fn time_can_still_be_bought_after_a_win() {
    let (mut round, a, _) = round_targeting_a();
    round.submit_guess(&a);

    assert_eq!(round.purchase_time(), Outcome::Won(1));
    assert_eq!(round.turns_used(), 2);
    assert_eq!(round.allowed_playback_secs(), 5);
    assert_eq!(round.log()[1], Guess::Skipped);
    assert_eq!(round.verdict(), Some(Verdict::GuessedIn(1)));

    for _ in 0..4 {
        round.purchase_time();
    }
    assert_eq!(round.turns_used(), 6);
    assert_eq!(round.purchase_time(), Outcome::Won(1));
    assert_eq!(round.turns_used(), 6);
    assert_eq!(round.allowed_playback_secs(), 13);
}

#[test]
fn guesses_after_loss_are_ignored() {
    let (mut round, a, b) = round_targeting_a();
    for _ in 0..6 {
        round.submit_guess(&b);
    }
    assert_eq!(round.submit_guess(&a), Outcome::Lost);
    assert_eq!(round.purchase_time(), Outcome::Lost);
    assert_eq!(round.turns_used(), 6);
    assert_eq!(round.log().len(), 6);
}

#[test]
fn log_length_tracks_turns_after_every_operation() {
    let (mut round, a, b) = round_targeting_a();
    let ops: [&dyn Fn(&mut GuessRound); 4] = [
        &|r: &mut GuessRound| {
            r.purchase_time();
        },
        &|r: &mut GuessRound| {
            r.submit_guess(&b);
        },
        &|r: &mut GuessRound| {
            r.purchase_time();
        },
        &|r: &mut GuessRound| {
            r.submit_guess(&a);
        },
    ];
    for op in ops {
        op(&mut round);
        assert_eq!(round.log().len(), round.turns_used());
    }
    assert_eq!(round.outcome(), Outcome::Won(4));
}

#[test]
fn purchase_adds_two_seconds_and_uses_a_turn() {
    let (mut round, _, _) = round_targeting_a();
    assert_eq!(round.purchase_time(), Outcome::InProgress);
    assert_eq!(round.allowed_playback_secs(), 5);
    assert_eq!(round.turns_used(), 1);
    assert_eq!(round.log(), &[Guess::Skipped]);

    round.purchase_time();
    assert_eq!(round.allowed_playback_secs(), 7);
}

#[test]
fn purchase_on_last_turn_loses() {
    let (mut round, _, b) = round_targeting_a();
    for _ in 0..5 {
        round.submit_guess(&b);
    }
    let before = round.allowed_playback_secs();
    assert_eq!(round.purchase_time(), Outcome::Lost);
    assert_eq!(round.allowed_playback_secs(), before + 2);
    assert_eq!(round.turns_used(), 6);
}

#[test]
fn win_on_last_turn_reports_out_of_guesses() {
    let (mut round, a, b) = round_targeting_a();
    for _ in 0..5 {
        round.submit_guess(&b);
    }
    assert_eq!(round.submit_guess(&a), Outcome::Won(6));
    assert_eq!(round.verdict(), Some(Verdict::OutOfGuesses));

    let (mut early, a, _) = round_targeting_a();
    for _ in 0..4 {
        early.purchase_time();
    }
    assert_eq!(early.submit_guess(&a), Outcome::Won(5));
    assert_eq!(early.verdict(), Some(Verdict::GuessedIn(5)));
}

#[test]
fn guesses_match_by_id_not_by_pointer() {
    let (mut round, a, _) = round_targeting_a();
    let lookalike = Arc::new(Track {
        title: "Renamed".into(),
        ..(*a).clone()
    });
    assert_eq!(round.submit_guess(&lookalike), Outcome::Won(1));
}

#[test]
fn reset_restores_a_clean_round_and_repicks() {
    let tracks = two_tracks();
    let mut round = GuessRound::with_picker(tracks.clone(), Rules::default(), last).unwrap();
    let b = Arc::clone(&tracks[1]);
    round.purchase_time();
    round.submit_guess(&Arc::clone(&tracks[0]));
    round.submit_guess(&b);
    assert_eq!(round.outcome(), Outcome::Won(3));

    round.reset();
    assert_eq!(round.turns_used(), 0);
    assert!(round.log().is_empty());
    assert_eq!(round.allowed_playback_secs(), 3);
    assert_eq!(round.outcome(), Outcome::InProgress);
    assert_eq!(round.target().id, "b");
}

#[test]
fn reset_can_change_the_target() {
    let tracks = share(
        (0..20)
            .map(|i| t(&i.to_string(), &format!("Song{i}"), "Band"))
            .collect(),
    );
    let mut round = GuessRound::new(tracks, Rules::default()).unwrap();
    let first_target = round.target().id.clone();
    let changed = (0..200).any(|_| {
        round.reset();
        round.target().id != first_target
    });
    assert!(changed);
}

#[test]
fn custom_rules_shape_the_round() {
    let rules = Rules {
        max_turns: 2,
        initial_preview_secs: 1,
        purchase_secs: 4,
    };
    let tracks = two_tracks();
    let b = Arc::clone(&tracks[1]);
    let mut round = GuessRound::with_picker(tracks, rules, first).unwrap();
    assert_eq!(round.allowed_playback_secs(), 1);
    round.purchase_time();
    assert_eq!(round.allowed_playback_secs(), 5);
    assert_eq!(round.submit_guess(&b), Outcome::Lost);
}

#[test]
fn verdict_messages() {
    assert_eq!(
        Verdict::GuessedIn(3).to_string(),
        "Congratulations! You guessed correctly in 3 turns."
    );
    assert_eq!(
        Verdict::OutOfGuesses.to_string(),
        "Game Over: You've used all your guesses!"
    );
    assert_eq!(
        Verdict::TimeUp.to_string(),
        "Sorry, you didn't guess correctly in time."
    );
}

#[test]
fn filter_empty_query_suggests_nothing() {
    let tracks = two_tracks();
    assert!(filter(&tracks, "").is_empty());
}

#[test]
fn filter_matches_title_or_artist_ignoring_case() {
    let tracks = share(vec![
        t("1", "Dancing Queen", "ABBA"),
        t("2", "Abbatoir Blues", "Nick Cave"),
        t("3", "Waterloo", "Abba"),
        t("4", "Yellow Submarine", "The Beatles"),
    ]);

    let ids: Vec<String> = filter(&tracks, "abba")
        .iter()
        .map(|t| t.id.clone())
        .collect();
    assert_eq!(ids, vec!["1", "2", "3"]);

    let ids: Vec<String> = filter(&tracks, "SUB").iter().map(|t| t.id.clone()).collect();
    assert_eq!(ids, vec!["4"]);

    assert!(filter(&tracks, "zeppelin").is_empty());
}

#[test]
fn filter_returns_shared_references() {
    let tracks = two_tracks();
    let hits = filter(&tracks, "song2");
    assert_eq!(hits.len(), 1);
    assert!(Arc::ptr_eq(&hits[0], &tracks[1]));
}
