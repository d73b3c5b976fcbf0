use std::time::{Duration, Instant};

/// A piece of periodic work driven by the host loop.
pub trait Tick {
    type Output;

    fn interval(&self) -> Duration;
    fn tick(&mut self) -> Self::Output;
}

/// Self-rescheduling wrapper around a [`Tick`].
///
/// The task is due immediately after construction. Once a tick has run, the
/// next one is due `interval` after the tick finished, so time spent inside
/// the tick delays every later tick.
pub struct RepeatingTask<T> {
    task: T,
    next_due: Instant,
}

impl<T: Tick> RepeatingTask<T> {
    pub fn start(task: T, now: Instant) -> Self {
        Self { task, next_due: now }
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_due
    }

    /// Runs the task if it is due at `now`. `finished` supplies the instant the
    /// tick completed, which anchors the next deadline.
    pub fn poll_with(&mut self, now: Instant, finished: impl FnOnce() -> Instant) -> Option<T::Output> {
        if !self.is_due(now) {
            return None;
        }
        let output = self.task.tick();
        self.next_due = finished() + self.task.interval();
        Some(output)
    }

    pub fn poll(&mut self, now: Instant) -> Option<T::Output> {
        self.poll_with(now, Instant::now)
    }

    pub fn next_due(&self) -> Instant {
        self.next_due
    }

    pub fn task(&self) -> &T {
        &self.task
    }
}

/// How long the host loop may sleep before the next frame.
///
/// Never longer than `max_wait`, and never past the earliest deadline, so a
/// due tick starts as soon as the OS wakes the loop instead of on the next
/// frame boundary.
pub fn frame_wait(now: Instant, deadlines: impl IntoIterator<Item = Instant>, max_wait: Duration) -> Duration {
    deadlines
        .into_iter()
        .map(|deadline| deadline.saturating_duration_since(now))
        .fold(max_wait, Duration::min)
}
