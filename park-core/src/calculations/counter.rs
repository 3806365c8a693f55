//! Count-up animation for dashboard stat counters.
//!
//! A counter climbs from zero to its target in roughly [`COUNTER_STEPS`]
//! equal increments, one per [`COUNTER_TICK`]. The animation itself is just
//! an iterator of displayed values; the caller owns the timer.

use std::time::Duration;

/// Number of increments a counter takes to reach its target.
pub const COUNTER_STEPS: i64 = 30;

/// Delay between two displayed counter values.
pub const COUNTER_TICK: Duration = Duration::from_millis(40);

/// Reads the target of a counter element.
///
/// The `data-target` value wins when present and non-empty, otherwise the
/// element text is used. The leading base-10 integer is taken (`"12 slots"`
/// is `12`); text without one yields `None` and the counter is left alone.
pub fn parse_counter_target(
    data_target: Option<&str>,
    text: &str,
) -> Option<i64> {
    let raw = match data_target {
        Some(d) if !d.is_empty() => d,
        _ => text,
    };
    leading_integer(raw)
}

fn leading_integer(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let sign_len = usize::from(s.starts_with(['+', '-']));
    let digits = s[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    s[..sign_len + digits].parse().ok()
}

/// State of one running counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountUp {
    target: i64,
    step: i64,
    current: i64,
    finished: bool,
}

impl CountUp {
    pub fn new(target: i64) -> Self {
        let step = if target > 0 {
            target / COUNTER_STEPS + i64::from(target % COUNTER_STEPS != 0)
        } else {
            0
        };
        Self {
            target,
            step,
            current: 0,
            finished: false,
        }
    }

    pub fn target(&self) -> i64 {
        self.target
    }

    pub fn step(&self) -> i64 {
        self.step
    }

    /// Value currently on display.
    pub fn current(&self) -> i64 {
        self.current
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advances one tick and returns the value to display, or `None` once
    /// the target has been shown.
    pub fn tick(&mut self) -> Option<i64> {
        if self.finished {
            return None;
        }
        self.current = self.current.saturating_add(self.step).min(self.target);
        if self.current >= self.target {
            self.finished = true;
        }
        Some(self.current)
    }
}

impl Iterator for CountUp {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        self.tick()
    }
}
