//! Core game logic and state management
//!
//! One generic round engine serves all three quiz modes; the differences
//! (point formulas, obfuscation vs. clue lists) live in policy values, not
//! in per-mode copies of the state machine.

pub mod policy;
pub mod round;
pub mod scoring;
pub mod session;
pub mod timer;

pub use policy::{clue_sequence, ImageObfuscation, ScoringPolicy, CLUE_COUNT};
pub use round::{FetchRequest, Round, RoundPhase, RoundToken};
pub use scoring::{Ledger, Outcome};
pub use session::{Session, SessionView};
pub use timer::{format_remaining, Countdown, TimerEvent, TimerState};
