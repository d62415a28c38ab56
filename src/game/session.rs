//! Session controller
//!
//! One `Session` per mode run. It owns the immutable configuration, the
//! active round, the scoring ledger, and the shared countdown, and it is the
//! only thing that mutates them. The host (TUI) feeds it discrete events:
//! key presses, fetch completions, and clock polls.
//!
//! The session never performs I/O itself. Creating or skipping a round
//! yields a `FetchRequest` the host runs on a worker; the result comes back
//! through `complete_fetch`, where the round-token guard drops anything
//! belonging to a superseded round.

use super::policy::{self, ImageObfuscation, ScoringPolicy};
use super::round::{FetchRequest, Round, RoundPhase, RoundToken};
use super::scoring::{Ledger, Outcome};
use super::timer::{Countdown, TimerEvent};
use crate::data::{generation, CreatureRecord, GameConfig, QuizMode};
use crate::QuizError;
use chrono::{DateTime, Utc};
use std::time::Instant;

/// A line in the session's message history
#[derive(Debug, Clone)]
pub struct SessionMessage {
    pub timestamp: DateTime<Utc>,
    pub text: String,
}

impl SessionMessage {
    fn now(text: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            text: text.into(),
        }
    }
}

/// Everything the screen needs for one render
#[derive(Debug, Clone)]
pub struct SessionView {
    pub mode: QuizMode,
    pub phase: RoundPhase,
    pub guess: String,
    pub feedback: String,
    pub points: u32,
    pub streak: u32,
    pub correct_count: u32,
    /// Current clue and (1-based position, total); stat mode only
    pub clue: Option<(String, usize, usize)>,
    /// In-effect obfuscation; image mode only
    pub obfuscation: Option<ImageObfuscation>,
    /// Sprite reference; image mode only
    pub sprite_url: Option<String>,
    /// Cry reference; audio mode only
    pub cry_url: Option<String>,
    /// Both localized names, present once revealed
    pub answer: Option<String>,
    /// Remaining seconds, when the timer is enabled
    pub remaining_secs: Option<u32>,
    pub load_failed: bool,
    /// The countdown ran out; the session only shows final totals now
    pub session_over: bool,
}

/// One continuous play of a single mode under one fixed configuration
pub struct Session {
    config: GameConfig,
    policy: ScoringPolicy,
    ledger: Ledger,
    timer: Countdown,
    round: Round,
    messages: Vec<SessionMessage>,
}

impl Session {
    /// Start a session and its first round. The caller must execute the
    /// returned fetch and deliver the result via `complete_fetch`.
    pub fn new(config: GameConfig, now: Instant) -> (Self, FetchRequest) {
        let mut timer = Countdown::disarmed();
        if config.timer_enabled {
            timer.arm(config.timer_duration.seconds(), now);
        }
        let mut session = Self {
            policy: ScoringPolicy::for_mode(config.mode),
            ledger: Ledger::new(),
            timer,
            round: Round::begin(RoundToken::fresh(), ImageObfuscation::CLEAR),
            messages: Vec::new(),
            config,
        };
        session.push_message(format!("{} started. Good luck!", session.config.mode));
        let request = session.fresh_round();
        (session, request)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn messages(&self) -> &[SessionMessage] {
        &self.messages
    }

    /// True once an enabled timer has expired: no more guessing or skipping.
    pub fn session_over(&self) -> bool {
        self.config.timer_enabled && self.timer.is_expired()
    }

    /// Replace the current round with a fresh `Loading` one.
    ///
    /// Superseded fetches die at the token guard; the shared countdown keeps
    /// running untouched.
    fn fresh_round(&mut self) -> FetchRequest {
        let token = RoundToken::fresh();
        let obfuscation = if self.config.mode == QuizMode::Image {
            policy::obfuscation_for(self.config.difficulty)
        } else {
            ImageObfuscation::CLEAR
        };
        self.round = Round::begin(token, obfuscation);
        let id = generation::random_creature_id(&self.config.generations, &mut rand::thread_rng());
        tracing::debug!(?token, id, "new round");
        FetchRequest { token, id }
    }

    /// Deliver a fetch result. Stale completions are silently discarded.
    pub fn complete_fetch(&mut self, token: RoundToken, result: Result<CreatureRecord, QuizError>) {
        if self.round.resolve_fetch(token, result) && self.round.load_failed() {
            self.push_message("Creature fetch failed.");
        }
    }

    /// Submit the guess buffer against the current creature.
    pub fn submit_guess(&mut self) {
        if self.session_over() {
            return;
        }
        let Some(outcome) = self.round.submit_guess() else {
            return;
        };
        let change = self.ledger.apply(&self.policy, outcome);
        match outcome {
            Outcome::Correct { .. } => {
                self.round.feedback = format!("Correct! (+{})", points_phrase(change));
                self.push_message(format!(
                    "Found {} (+{})",
                    self.answer_names().unwrap_or_default(),
                    points_phrase(change)
                ));
            }
            Outcome::Incorrect => {
                self.round.feedback = if change < 0 {
                    format!("Wrong answer, try again! (-{})", points_phrase(-change))
                } else {
                    "Wrong answer, try again!".to_string()
                };
            }
            _ => {}
        }
    }

    /// Give up: reveal both names and take the mode's penalty.
    pub fn give_up(&mut self) {
        if self.session_over() {
            return;
        }
        let Some(outcome) = self.round.give_up() else {
            return;
        };
        let change = self.ledger.apply(&self.policy, outcome);
        let names = self.answer_names().unwrap_or_default();
        self.round.feedback = if change < 0 {
            format!("The answer was: {}. (-{})", names, points_phrase(-change))
        } else {
            format!("The answer was: {}.", names)
        };
        self.push_message(format!("Gave up on {}", names));
    }

    /// Reveal one more stat clue.
    pub fn request_clue(&mut self) {
        if self.session_over() || self.config.mode != QuizMode::Stat {
            return;
        }
        self.round.request_clue();
    }

    /// Move on to the next creature. None when the session is over.
    pub fn next_round(&mut self) -> Option<FetchRequest> {
        if self.session_over() {
            return None;
        }
        Some(self.fresh_round())
    }

    /// Advance the countdown. On expiry the active round is force-revealed
    /// and the ledger freezes.
    pub fn poll_timer(&mut self, now: Instant) {
        for event in self.timer.poll(now) {
            if event == TimerEvent::Expired {
                tracing::info!("session countdown expired");
                self.round.expire();
                self.ledger.apply(&self.policy, Outcome::TimedOut);
                self.round.feedback = format!(
                    "Time's up! You found {} creature{}.",
                    self.ledger.correct_count,
                    if self.ledger.correct_count == 1 { "" } else { "s" }
                );
                self.push_message("Time's up!");
            }
        }
    }

    pub fn push_guess_char(&mut self, c: char) {
        if self.round.phase() == RoundPhase::Active && !self.session_over() {
            self.round.guess.push(c);
        }
    }

    pub fn pop_guess_char(&mut self) {
        if self.round.phase() == RoundPhase::Active && !self.session_over() {
            self.round.guess.pop();
        }
    }

    fn answer_names(&self) -> Option<String> {
        self.round.creature().map(CreatureRecord::display_names)
    }

    fn push_message(&mut self, text: impl Into<String>) {
        self.messages.push(SessionMessage::now(text));
    }

    /// Assemble the screen-facing state for one render.
    pub fn view(&self) -> SessionView {
        let revealed = self.round.phase() == RoundPhase::Revealed;
        let creature = self.round.creature();
        SessionView {
            mode: self.config.mode,
            phase: self.round.phase(),
            guess: self.round.guess.clone(),
            feedback: self.round.feedback.clone(),
            points: self.ledger.points,
            streak: self.ledger.streak,
            correct_count: self.ledger.correct_count,
            clue: if self.config.mode == QuizMode::Stat {
                self.round.current_clue().map(|c| {
                    (
                        c.to_string(),
                        self.round.clue_cursor() + 1,
                        self.round.clues().len(),
                    )
                })
            } else {
                None
            },
            obfuscation: (self.config.mode == QuizMode::Image).then(|| self.round.obfuscation()),
            sprite_url: if self.config.mode == QuizMode::Image {
                creature.and_then(|c| c.sprite_url.clone())
            } else {
                None
            },
            cry_url: if self.config.mode == QuizMode::Audio {
                creature.map(|c| c.cry_url.clone())
            } else {
                None
            },
            answer: if revealed { self.answer_names() } else { None },
            remaining_secs: self.config.timer_enabled.then(|| self.timer.remaining()),
            load_failed: self.round.load_failed(),
            session_over: self.session_over(),
        }
    }
}

fn points_phrase(n: i64) -> String {
    format!("{} point{}", n, if n == 1 { "" } else { "s" })
}
