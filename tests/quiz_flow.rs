//! End-to-end session flow against a stubbed creature source

use poke_quizz::data::{CreatureRecord, GameConfig, QuizMode, StatSet, TimerDuration};
use poke_quizz::game::{RoundPhase, Session};
use poke_quizz::net::{CreatureSource, FetchWorker};
use poke_quizz::QuizError;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Serves a fixed roster without touching the network.
struct StubSource;

impl CreatureSource for StubSource {
    fn fetch_creature(&self, id: u32) -> Result<CreatureRecord, QuizError> {
        Ok(CreatureRecord {
            id,
            name_en: "Pikachu".to_string(),
            name_fr: "Pikachu".to_string(),
            sprite_url: Some(format!("https://stub.test/{}.png", id)),
            cry_url: format!("https://stub.test/{}.mp3", id),
            stats: StatSet {
                hp: Some(35),
                attack: Some(55),
                special_attack: Some(50),
                defense: Some(40),
                special_defense: Some(50),
                speed: Some(90),
            },
            height: Some(4),
            weight: Some(60),
            habitat: Some("forest".to_string()),
            color: Some("yellow".to_string()),
            generation: Some("generation-i".to_string()),
        })
    }
}

fn config() -> GameConfig {
    GameConfig {
        timer_enabled: true,
        timer_duration: TimerDuration::OneMinute,
        generations: [1u8].into_iter().collect(),
        ..GameConfig::new(QuizMode::Stat)
    }
}

/// Run one fetch through the worker thread and deliver it to the session.
fn fetch_via_worker(
    worker: &FetchWorker,
    session: &mut Session,
    request: poke_quizz::game::FetchRequest,
) {
    worker.submit(request);
    let deadline = Instant::now() + Duration::from_secs(2);
    while Instant::now() < deadline {
        if let Some((token, result)) = worker.try_recv() {
            session.complete_fetch(token, result);
            return;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    panic!("fetch worker did not answer in time");
}

#[test]
fn full_round_lifecycle() {
    let worker = FetchWorker::spawn(Arc::new(StubSource));
    let t0 = Instant::now();
    let (mut session, request) = Session::new(config(), t0);

    // Generation filter {1} keeps identifiers in the first range.
    assert!((1..=151).contains(&request.id));

    fetch_via_worker(&worker, &mut session, request);
    assert_eq!(session.round().phase(), RoundPhase::Active);

    // Wrong guess: feedback, streak 0, points unchanged, still guessable.
    for c in "mewtwo".chars() {
        session.push_guess_char(c);
    }
    session.submit_guess();
    assert_eq!(session.round().feedback, "Wrong answer, try again!");
    assert_eq!(session.ledger().streak, 0);
    assert_eq!(session.ledger().points, 0);
    assert_eq!(session.round().phase(), RoundPhase::Active);

    // Give up: stat-mode penalty of 3, floored at 0; both names revealed.
    session.give_up();
    assert_eq!(session.ledger().points, 0);
    assert_eq!(session.round().phase(), RoundPhase::Revealed);
    assert_eq!(session.view().answer.as_deref(), Some("Pikachu / Pikachu"));

    // Next round: fresh state, cleared buffer, cursor back at the start.
    let next = session.next_round().expect("session still running");
    assert!((1..=151).contains(&next.id));
    assert_eq!(session.round().phase(), RoundPhase::Loading);
    assert_eq!(session.round().guess, "");
    assert_eq!(session.round().clue_cursor(), 0);
    assert_ne!(next.token, request.token);
}

#[test]
fn stat_scoring_rewards_fewer_clues() {
    let worker = FetchWorker::spawn(Arc::new(StubSource));
    let (mut session, request) = Session::new(config(), Instant::now());
    fetch_via_worker(&worker, &mut session, request);

    // Burn three extra clues, then answer.
    session.request_clue();
    session.request_clue();
    session.request_clue();
    for c in "pikachu".chars() {
        session.push_guess_char(c);
    }
    session.submit_guess();

    assert_eq!(session.ledger().points, 7); // max(10 - 3, 1)
    assert_eq!(session.ledger().correct_count, 1);
    assert_eq!(session.round().feedback, "Correct! (+7 points)");
}

#[test]
fn fetch_from_a_dropped_session_never_reaches_its_successor() {
    // One worker serves every session the player starts. Leaving a session
    // with its first fetch still in flight must not let that creature land
    // in the next session's opening round.
    let worker = FetchWorker::spawn(Arc::new(StubSource));

    let (session_a, request_a) = Session::new(config(), Instant::now());
    worker.submit(request_a);
    drop(session_a);

    let (mut session_b, request_b) = Session::new(config(), Instant::now());
    assert_ne!(request_a.token, request_b.token);

    // Drain the dead session's completion into B, the only session left.
    let deadline = Instant::now() + Duration::from_secs(2);
    loop {
        if let Some((token, result)) = worker.try_recv() {
            assert_eq!(token, request_a.token);
            session_b.complete_fetch(token, result);
            break;
        }
        assert!(Instant::now() < deadline, "fetch worker did not answer in time");
        std::thread::sleep(Duration::from_millis(5));
    }
    assert_eq!(session_b.round().phase(), RoundPhase::Loading);
    assert!(session_b.round().creature().is_none());

    // B's own fetch still resolves normally.
    fetch_via_worker(&worker, &mut session_b, request_b);
    assert_eq!(session_b.round().phase(), RoundPhase::Active);
}

#[test]
fn countdown_expiry_ends_the_session() {
    let worker = FetchWorker::spawn(Arc::new(StubSource));
    let t0 = Instant::now();
    let (mut session, request) = Session::new(config(), t0);
    fetch_via_worker(&worker, &mut session, request);

    session.poll_timer(t0 + Duration::from_secs(61));
    assert!(session.session_over());
    assert_eq!(session.round().phase(), RoundPhase::Revealed);
    assert!(session.next_round().is_none());

    let view = session.view();
    assert!(view.session_over);
    assert_eq!(view.remaining_secs, Some(0));
}
