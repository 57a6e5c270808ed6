//! Scoped tick timer and the population simulation driver.
//!
//! The view loop calls `update(elapsed)` every frame. A `TickTimer` turns
//! elapsed wall time into a whole number of fixed-period ticks. The driver
//! holds its timer as an `Option`: it is acquired on `start` and released on
//! `pause`, `reset`, or drop, so once a simulation stops nothing can tick it
//! again.

use std::time::Duration;

use eduscope_logic::population::{PopulationParams, PopulationSimulator};

use crate::config::CoreConfig;

/// Accumulates elapsed time and reports ticks due at a fixed interval.
#[derive(Debug)]
pub struct TickTimer {
    interval: Duration,
    accumulated: Duration,
    max_catch_up: u32,
}

impl TickTimer {
    pub fn acquire(interval: Duration, max_catch_up: u32) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            accumulated: Duration::ZERO,
            max_catch_up: max_catch_up.max(1),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Add `elapsed` and return how many ticks are due. After a long stall
    /// at most `max_catch_up` ticks fire and the backlog is dropped.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulated += elapsed;
        let mut due = 0;
        while self.accumulated >= self.interval && due < self.max_catch_up {
            self.accumulated -= self.interval;
            due += 1;
        }
        if self.accumulated >= self.interval {
            self.accumulated = Duration::ZERO;
        }
        due
    }
}

/// Owns a `PopulationSimulator` and the timer that drives it.
#[derive(Debug)]
pub struct PopulationDriver {
    sim: PopulationSimulator,
    timer: Option<TickTimer>,
    interval: Duration,
    max_catch_up: u32,
}

impl PopulationDriver {
    pub fn new(params: PopulationParams, interval: Duration, max_catch_up: u32) -> Self {
        Self::from_simulator(PopulationSimulator::new(params), interval, max_catch_up)
    }

    pub fn from_config(config: &CoreConfig) -> Self {
        Self::new(
            config.population,
            config.tick_interval(),
            config.max_catch_up_ticks,
        )
    }

    /// Wrap an existing simulator. It comes back stopped; call `start` to resume.
    pub fn from_simulator(mut sim: PopulationSimulator, interval: Duration, max_catch_up: u32) -> Self {
        sim.pause();
        Self {
            sim,
            timer: None,
            interval,
            max_catch_up,
        }
    }

    pub fn simulator(&self) -> &PopulationSimulator {
        &self.sim
    }

    /// Whether a timer is currently held.
    pub fn has_timer(&self) -> bool {
        self.timer.is_some()
    }

    pub fn start(&mut self) -> bool {
        if !self.sim.start() {
            return false;
        }
        self.timer = Some(TickTimer::acquire(self.interval, self.max_catch_up));
        log::info!("Population simulation started at tick {}", self.sim.latest().tick);
        true
    }

    pub fn pause(&mut self) -> bool {
        self.timer = None;
        let paused = self.sim.pause();
        if paused {
            log::info!("Population simulation paused at tick {}", self.sim.latest().tick);
        }
        paused
    }

    pub fn reset(&mut self) {
        self.timer = None;
        self.sim.reset();
        log::info!("Population simulation reset");
    }

    /// Run any ticks that came due during `elapsed`. Returns the number applied.
    pub fn update(&mut self, elapsed: Duration) -> u32 {
        let due = match self.timer.as_mut() {
            Some(timer) => timer.advance(elapsed),
            None => return 0,
        };
        let mut applied = 0;
        for _ in 0..due {
            if self.sim.tick().is_some() {
                applied += 1;
            }
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_millis(100);

    fn driver() -> PopulationDriver {
        PopulationDriver::new(PopulationParams::default(), TICK, 10)
    }

    #[test]
    fn test_timer_fires_on_interval() {
        let mut timer = TickTimer::acquire(TICK, 10);
        assert_eq!(timer.advance(Duration::from_millis(60)), 0);
        assert_eq!(timer.advance(Duration::from_millis(60)), 1);
        // 20ms carried over
        assert_eq!(timer.advance(Duration::from_millis(180)), 2);
    }

    #[test]
    fn test_timer_caps_catch_up() {
        let mut timer = TickTimer::acquire(TICK, 5);
        assert_eq!(timer.advance(Duration::from_secs(30)), 5);
        // backlog dropped
        assert_eq!(timer.advance(Duration::from_millis(50)), 0);
    }

    #[test]
    fn test_timer_keeps_remainder_at_cap() {
        let mut timer = TickTimer::acquire(TICK, 5);
        // exactly five ticks due plus 60ms left over
        assert_eq!(timer.advance(Duration::from_millis(560)), 5);
        assert_eq!(timer.advance(Duration::from_millis(40)), 1);
    }

    #[test]
    fn test_stopped_driver_does_not_tick() {
        let mut d = driver();
        assert_eq!(d.update(Duration::from_secs(1)), 0);
        assert_eq!(d.simulator().history().len(), 1);
    }

    #[test]
    fn test_start_update_pause() {
        let mut d = driver();
        assert!(d.start());
        assert!(d.has_timer());
        assert_eq!(d.update(Duration::from_millis(350)), 3);
        assert_eq!(d.simulator().latest().tick, 3);

        assert!(d.pause());
        assert!(!d.has_timer());
        assert_eq!(d.update(Duration::from_secs(5)), 0);
        assert_eq!(d.simulator().latest().tick, 3);
    }

    #[test]
    fn test_restart_does_not_replay_paused_time() {
        let mut d = driver();
        d.start();
        d.update(Duration::from_millis(90));
        d.pause();
        d.start();
        // the 90ms from before the pause were released with the old timer
        assert_eq!(d.update(Duration::from_millis(20)), 0);
    }

    #[test]
    fn test_reset_releases_timer() {
        let mut d = driver();
        d.start();
        d.update(Duration::from_millis(500));
        d.reset();
        assert!(!d.has_timer());
        assert_eq!(d.simulator().history().len(), 1);
        assert_eq!(d.update(Duration::from_secs(1)), 0);
    }

    #[test]
    fn test_from_simulator_comes_back_stopped() {
        let mut sim = PopulationSimulator::default();
        sim.start();
        sim.tick();
        let d = PopulationDriver::from_simulator(sim, TICK, 10);
        assert!(!d.simulator().is_running());
        assert!(!d.has_timer());
        assert_eq!(d.simulator().latest().tick, 1);
    }
}
