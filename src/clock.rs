use std::time::Duration;

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use crate::constants::*;
use crate::schedule::Tick;

/// Free-running time value, advanced one second per tick and never synced
/// to the system clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedClock {
    now: NaiveDateTime,
}

impl SimulatedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now }
    }

    /// 22:00:00 on `date`.
    pub fn seeded(date: NaiveDate) -> Self {
        Self::new(date.and_time(NaiveTime::MIN + TimeDelta::seconds(CLOCK_SEED_SECONDS)))
    }

    pub fn now(&self) -> NaiveDateTime {
        self.now
    }

    /// 12-hour `hh:mm AM/PM`.
    pub fn display(&self) -> String {
        self.now.format(CLOCK_FORMAT).to_string()
    }

    pub fn advance(&mut self) {
        self.now += TimeDelta::seconds(1);
    }
}

/// Text of the clock overlay.
#[derive(Debug)]
pub struct ClockLabel {
    clock: SimulatedClock,
    text: String,
}

impl ClockLabel {
    pub fn new(clock: SimulatedClock) -> Self {
        Self {
            clock,
            text: String::new(),
        }
    }

    /// Label seeded at 22:00:00 on the local current date.
    pub fn today() -> Self {
        Self::new(SimulatedClock::seeded(Local::now().date_naive()))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn clock(&self) -> &SimulatedClock {
        &self.clock
    }

    /// Shows the current simulated time, then moves it forward one second.
    pub fn update(&mut self) -> String {
        self.text = self.clock.display();
        log::debug!("clock shows {}", self.text);
        self.clock.advance();
        self.text.clone()
    }
}

impl Tick for ClockLabel {
    type Output = String;

    fn interval(&self) -> Duration {
        CLOCK_INTERVAL
    }

    fn tick(&mut self) -> String {
        self.update()
    }
}
