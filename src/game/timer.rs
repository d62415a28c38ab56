//! Session countdown timer
//!
//! One shared countdown per session, driven by `poll` from the host event
//! loop. While armed it emits one decrement per elapsed wall-clock second;
//! on reaching zero it emits a single `Expired` and disarms itself. Time is
//! injected through `Instant` arguments so tests control the clock.

use std::time::{Duration, Instant};

/// Events emitted while the countdown runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// One second elapsed; carries the remaining seconds
    Tick(u32),
    /// The countdown reached zero. Emitted exactly once per arming.
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Disarmed,
    Armed,
    Expired,
}

/// A cancellable one-per-second countdown
#[derive(Debug, Clone)]
pub struct Countdown {
    state: TimerState,
    remaining: u32,
    last_tick: Option<Instant>,
}

impl Countdown {
    pub fn disarmed() -> Self {
        Self {
            state: TimerState::Disarmed,
            remaining: 0,
            last_tick: None,
        }
    }

    /// Arm with a fresh duration.
    ///
    /// Unconditional: any pending decrement from a previous arming is
    /// cancelled and the countdown restarts from `duration_secs`.
    pub fn arm(&mut self, duration_secs: u32, now: Instant) {
        self.state = TimerState::Armed;
        self.remaining = duration_secs;
        self.last_tick = Some(now);
    }

    /// Cancel the countdown without emitting anything further.
    pub fn disarm(&mut self) {
        self.state = TimerState::Disarmed;
        self.last_tick = None;
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_expired(&self) -> bool {
        self.state == TimerState::Expired
    }

    /// Consume the whole seconds elapsed since the last poll.
    ///
    /// Returns the decrements in order, ending with `Expired` if zero was
    /// reached. Disarmed and already-expired timers emit nothing.
    pub fn poll(&mut self, now: Instant) -> Vec<TimerEvent> {
        if self.state != TimerState::Armed {
            return Vec::new();
        }
        let Some(mut last) = self.last_tick else {
            return Vec::new();
        };

        let mut events = Vec::new();
        while now.duration_since(last) >= Duration::from_secs(1) && self.remaining > 0 {
            last += Duration::from_secs(1);
            self.remaining -= 1;
            events.push(TimerEvent::Tick(self.remaining));
            if self.remaining == 0 {
                self.state = TimerState::Expired;
                self.last_tick = None;
                events.push(TimerEvent::Expired);
                return events;
            }
        }
        self.last_tick = Some(last);
        events
    }
}

/// Human-readable remaining time: "45 seconds", "1 minute 5 seconds", "5 minutes"
pub fn format_remaining(secs: u32) -> String {
    if secs < 60 {
        return format!("{} second{}", secs, if secs == 1 { "" } else { "s" });
    }
    let minutes = secs / 60;
    let rest = secs % 60;
    let mut out = format!("{} minute{}", minutes, if minutes == 1 { "" } else { "s" });
    if rest > 0 {
        out.push_str(&format!(
            " {} second{}",
            rest,
            if rest == 1 { "" } else { "s" }
        ));
    }
    out
}
