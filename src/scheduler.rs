use std::time::{Duration, Instant};

use log::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tick {
    Enemy,
    Clock,
}

pub const ENEMY_TICK: Duration = Duration::from_millis(800);
pub const CLOCK_TICK: Duration = Duration::from_millis(1000);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pace {
    pub enemy: Duration,
    pub clock: Duration,
}

impl Default for Pace {
    fn default() -> Self {
        Self {
            enemy: ENEMY_TICK,
            clock: CLOCK_TICK,
        }
    }
}

/// Capability to run repeating ticks and to stop all of them at once.
pub trait Scheduler {
    fn schedule(&mut self, tick: Tick, every: Duration);
    fn cancel_all(&mut self);
}

#[derive(Clone, Copy, Debug)]
struct Interval {
    tick: Tick,
    every: Duration,
    next: Instant,
}

#[derive(Debug)]
pub struct IntervalScheduler {
    timers: Vec<Interval>,
    clock: fn() -> Instant,
}

impl Default for IntervalScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl IntervalScheduler {
    pub fn new() -> Self {
        Self::with_clock(Instant::now)
    }

    pub fn with_clock(clock: fn() -> Instant) -> Self {
        Self {
            timers: Vec::new(),
            clock,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.timers.is_empty()
    }

    /// Each tick fires at most once per call; one that fell more than a
    /// period behind is re-armed a period after `now`.
    pub fn due(&mut self, now: Instant) -> Vec<Tick> {
        let mut fired = Vec::new();
        for timer in &mut self.timers {
            if now >= timer.next {
                fired.push(timer.tick);
                timer.next += timer.every;
                if timer.next <= now {
                    timer.next = now + timer.every;
                }
            }
        }
        fired
    }
}

impl Scheduler for IntervalScheduler {
    fn schedule(&mut self, tick: Tick, every: Duration) {
        debug!("scheduling {tick:?} every {every:?}");
        let next = (self.clock)() + every;
        self.timers.push(Interval { tick, every, next });
    }

    fn cancel_all(&mut self) {
        if !self.timers.is_empty() {
            debug!("cancelling {} timer(s)", self.timers.len());
        }
        self.timers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::OnceLock;

    fn epoch() -> Instant {
        static EPOCH: OnceLock<Instant> = OnceLock::new();
        *EPOCH.get_or_init(Instant::now)
    }

    fn ms(n: u64) -> Instant {
        epoch() + Duration::from_millis(n)
    }

    fn scheduler() -> IntervalScheduler {
        let mut scheduler = IntervalScheduler::with_clock(epoch);
        let pace = Pace::default();
        scheduler.schedule(Tick::Enemy, pace.enemy);
        scheduler.schedule(Tick::Clock, pace.clock);
        scheduler
    }

    #[test]
    fn ticks_fire_on_their_own_cadence() {
        let mut s = scheduler();
        assert!(s.due(ms(799)).is_empty());
        assert_eq!(s.due(ms(800)), vec![Tick::Enemy]);
        assert_eq!(s.due(ms(1000)), vec![Tick::Clock]);
        assert_eq!(s.due(ms(1600)), vec![Tick::Enemy]);
        assert_eq!(s.due(ms(2400)), vec![Tick::Enemy, Tick::Clock]);
        assert!(s.due(ms(2999)).is_empty());
        assert_eq!(s.due(ms(3000)), vec![Tick::Clock]);
    }

    #[test]
    fn late_polls_do_not_burst() {
        let mut s = scheduler();
        assert_eq!(s.due(ms(5000)), vec![Tick::Enemy, Tick::Clock]);
        assert!(s.due(ms(5001)).is_empty());
        assert_eq!(s.due(ms(5800)), vec![Tick::Enemy]);
    }

    #[test]
    fn cancel_all_stops_everything() {
        let mut s = scheduler();
        s.cancel_all();
        assert!(s.is_idle());
        assert!(s.due(ms(10_000)).is_empty());
    }
}
