use std::thread;
use std::time::{Duration, Instant};

use crate::error::GameError;

/// Paces the game loop. `tick` is called exactly once per frame and is the
/// only place where the loop waits.
pub trait FrameLimiter {
    /// Waits until the next frame at `fps` frames per second is due and
    /// returns the time elapsed since the previous tick.
    fn tick(&mut self, fps: u32) -> Result<Duration, GameError>;
}

impl<L: FrameLimiter + ?Sized> FrameLimiter for Box<L> {
    fn tick(&mut self, fps: u32) -> Result<Duration, GameError> {
        (**self).tick(fps)
    }
}

/// Wall-clock limiter that sleeps away whatever is left of the frame.
#[derive(Debug, Default)]
pub struct Clock {
    last_tick: Option<Instant>,
}

impl Clock {
    pub fn new() -> Self {
        Clock { last_tick: None }
    }
}

impl FrameLimiter for Clock {
    fn tick(&mut self, fps: u32) -> Result<Duration, GameError> {
        let frame = Duration::from_secs(1) / fps.max(1);
        let elapsed = match self.last_tick {
            Some(last) => {
                let spent = last.elapsed();
                if spent < frame {
                    thread::sleep(frame - spent);
                }
                last.elapsed()
            }
            None => Duration::ZERO,
        };
        self.last_tick = Some(Instant::now());
        Ok(elapsed)
    }
}

/// Limiter that never waits, for headless runs and tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    ticks: u64,
}

impl ManualClock {
    pub fn new() -> Self {
        ManualClock { ticks: 0 }
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl FrameLimiter for ManualClock {
    fn tick(&mut self, fps: u32) -> Result<Duration, GameError> {
        self.ticks += 1;
        Ok(Duration::from_secs(1) / fps.max(1))
    }
}

/// Lets `budget` ticks through to the wrapped limiter and fails the next one
/// with `GameError::TickBudgetExhausted`, which ends the game loop.
#[derive(Debug)]
pub struct TickBudget<L> {
    inner: L,
    budget: u64,
    used: u64,
}

impl<L: FrameLimiter> TickBudget<L> {
    pub fn new(inner: L, budget: u64) -> Self {
        TickBudget {
            inner,
            budget,
            used: 0,
        }
    }

    pub fn used(&self) -> u64 {
        self.used
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }
}

impl<L: FrameLimiter> FrameLimiter for TickBudget<L> {
    fn tick(&mut self, fps: u32) -> Result<Duration, GameError> {
        if self.used >= self.budget {
            return Err(GameError::TickBudgetExhausted { ticks: self.used });
        }
        self.used += 1;
        self.inner.tick(fps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_first_tick_does_not_wait() {
        let mut clock = Clock::new();
        let started = Instant::now();
        assert_eq!(clock.tick(1).unwrap(), Duration::ZERO);
        assert!(started.elapsed() < Duration::from_millis(500));
    }

    #[test]
    fn test_clock_paces_frames() {
        let mut clock = Clock::new();
        clock.tick(50).unwrap();
        let elapsed = clock.tick(50).unwrap();
        assert!(elapsed >= Duration::from_millis(20));
    }

    #[test]
    fn test_manual_clock_counts() {
        let mut clock = ManualClock::new();
        assert_eq!(clock.tick(20).unwrap(), Duration::from_millis(50));
        clock.tick(20).unwrap();
        assert_eq!(clock.ticks(), 2);
    }

    #[test]
    fn test_budget_delegates_then_stops() {
        let mut limiter = TickBudget::new(ManualClock::new(), 1);
        assert!(limiter.tick(20).is_ok());
        assert_eq!(limiter.inner().ticks(), 1);
        match limiter.tick(20) {
            Err(GameError::TickBudgetExhausted { ticks }) => assert_eq!(ticks, 1),
            other => panic!("expected the budget to run out, got {:?}", other),
        }
        // the wrapped limiter is not touched once the budget is spent
        assert_eq!(limiter.inner().ticks(), 1);
        assert_eq!(limiter.used(), 1);
    }

    #[test]
    fn test_boxed_limiter() {
        let mut limiter: Box<dyn FrameLimiter> = Box::new(TickBudget::new(ManualClock::new(), 0));
        assert!(limiter.tick(20).is_err());
    }
}
