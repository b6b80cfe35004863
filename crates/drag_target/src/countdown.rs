use core::time::Duration;

use bevy::prelude::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CountdownPhase {
    #[default]
    Idle,
    Running,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountdownTick {
    Running { remaining: u32 },
    Expired,
}

/// Whole-second countdown with its own one-second clock.
///
/// The clock only advances while the countdown is running, so a stopped
/// countdown never produces ticks no matter how much time passes.
#[derive(Clone, Debug)]
pub struct Countdown {
    duration: u32,
    remaining: u32,
    phase: CountdownPhase,
    clock: Timer,
}

impl Countdown {
    pub fn new(duration_secs: u32) -> Self {
        Self {
            duration: duration_secs,
            remaining: duration_secs,
            phase: CountdownPhase::Idle,
            clock: Timer::new(Duration::from_secs(1), TimerMode::Repeating),
        }
    }

    pub const fn phase(&self) -> CountdownPhase {
        self.phase
    }

    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    pub const fn duration(&self) -> u32 {
        self.duration
    }

    /// Idle -> Running. Returns `false` if it was already running.
    pub fn start(&mut self) -> bool {
        if self.phase == CountdownPhase::Running {
            return false;
        }
        self.phase = CountdownPhase::Running;
        self.remaining = self.duration;
        self.clock.reset();
        true
    }

    /// Back to Idle with a full countdown.
    pub fn stop(&mut self) {
        self.phase = CountdownPhase::Idle;
        self.remaining = self.duration;
        self.clock.reset();
    }

    /// One elapsed second. `None` while idle.
    fn tick(&mut self) -> Option<CountdownTick> {
        if self.phase == CountdownPhase::Idle {
            return None;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.stop();
            Some(CountdownTick::Expired)
        } else {
            Some(CountdownTick::Running {
                remaining: self.remaining,
            })
        }
    }

    /// Feeds frame time into the clock and applies every whole second that
    /// elapsed. Stops at expiry even if more seconds were due.
    pub fn advance(&mut self, delta: Duration) -> Option<CountdownTick> {
        if self.phase == CountdownPhase::Idle {
            return None;
        }
        self.clock.tick(delta);
        let mut last = None;
        for _ in 0..self.clock.times_finished_this_tick() {
            last = self.tick();
            if last == Some(CountdownTick::Expired) {
                break;
            }
        }
        last
    }
}

#[cfg(test)]
#[expect(
    clippy::missing_assert_message,
    reason = "assert_eq output already shows both sides"
)]
mod tests {
    use super::*;

    #[test]
    fn idle_countdown_ignores_time() {
        let mut countdown = Countdown::new(10);
        assert_eq!(countdown.tick(), None);
        assert_eq!(countdown.advance(Duration::from_secs(30)), None);
        assert_eq!(countdown.remaining(), 10);
        assert_eq!(countdown.phase(), CountdownPhase::Idle);
    }

    #[test]
    fn counts_down_over_ten_ticks() {
        let mut countdown = Countdown::new(10);
        assert!(countdown.start());
        assert!(!countdown.start());

        for expected in (1..10).rev() {
            assert_eq!(
                countdown.tick(),
                Some(CountdownTick::Running {
                    remaining: expected
                })
            );
        }
        assert_eq!(countdown.tick(), Some(CountdownTick::Expired));
        assert_eq!(countdown.phase(), CountdownPhase::Idle);
        assert_eq!(countdown.remaining(), 10);
    }

    #[test]
    fn frame_time_accumulates_into_seconds() {
        let mut countdown = Countdown::new(10);
        countdown.start();

        assert_eq!(countdown.advance(Duration::from_millis(600)), None);
        assert_eq!(
            countdown.advance(Duration::from_millis(600)),
            Some(CountdownTick::Running { remaining: 9 })
        );
        assert_eq!(
            countdown.advance(Duration::from_millis(3000)),
            Some(CountdownTick::Running { remaining: 6 })
        );
        assert_eq!(
            countdown.advance(Duration::from_secs(60)),
            Some(CountdownTick::Expired)
        );
        assert_eq!(countdown.phase(), CountdownPhase::Idle);
        assert_eq!(countdown.remaining(), 10);
    }

    #[test]
    fn restart_resets_the_clock() {
        let mut countdown = Countdown::new(3);
        countdown.start();
        countdown.advance(Duration::from_millis(900));
        countdown.stop();
        countdown.start();
        assert_eq!(countdown.advance(Duration::from_millis(200)), None);
        assert_eq!(countdown.remaining(), 3);
    }
}
