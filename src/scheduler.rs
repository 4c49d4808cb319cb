use crate::{Automaton, SchedulerConfig};
use log::{info, trace, warn};

/// Direction of a rate change.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RateChange {
    Faster,
    Slower,
}

/// Runs generations at a fixed rate, independent of how often `update` is called.
#[derive(Clone, Debug)]
pub struct StepScheduler {
    steps_per_second: f64,
    sps_min: f64,
    sps_max: f64,
    step_interval: f64,
    running: bool,
    accumulated_time: f64,
}

impl StepScheduler {
    pub fn new(config: &SchedulerConfig) -> Self {
        let steps_per_second = config.sps_initial.max(config.sps_min).min(config.sps_max);
        StepScheduler {
            steps_per_second,
            sps_min: config.sps_min,
            sps_max: config.sps_max,
            step_interval: steps_per_second.recip(),
            running: false,
            accumulated_time: 0.0,
        }
    }

    #[inline]
    pub fn steps_per_second(&self) -> f64 {
        self.steps_per_second
    }

    /// Seconds between two generations.
    #[inline]
    pub fn step_interval(&self) -> f64 {
        self.step_interval
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Seconds carried over toward the next generation.
    #[inline]
    pub fn accumulated_time(&self) -> f64 {
        self.accumulated_time
    }

    /// Switch between running and paused.
    ///
    /// Starting primes the accumulator with a full interval, so the first generation happens on the
    /// very next `update`.
    pub fn toggle(&mut self) {
        self.running = !self.running;
        if self.running {
            self.accumulated_time = self.step_interval;
        }
        info!(
            "simulation {} at {} steps/s",
            if self.running { "running" } else { "paused" },
            self.steps_per_second
        );
    }

    /// Advance exactly one generation and pause.
    pub fn single_step(&mut self, automaton: &mut Automaton) {
        automaton.advance_generation();
        if self.running {
            info!("simulation paused by single step");
        }
        self.running = false;
    }

    /// Double or halve the rate within bounds. Returns the new rate.
    pub fn set_rate(&mut self, change: RateChange) -> f64 {
        let requested = match change {
            RateChange::Faster => self.steps_per_second * 2.0,
            RateChange::Slower => self.steps_per_second / 2.0,
        };
        let steps_per_second = requested.max(self.sps_min).min(self.sps_max);
        if steps_per_second != self.steps_per_second {
            self.steps_per_second = steps_per_second;
            self.step_interval = steps_per_second.recip();
            info!("rate set to {} steps/s", steps_per_second);
        }
        self.steps_per_second
    }

    /// Account for `dt` seconds of wall time and advance as many generations as are due.
    ///
    /// Returns the number of generations advanced. Does nothing while paused.
    pub fn update(&mut self, dt: f64, automaton: &mut Automaton) -> u32 {
        if !self.running {
            return 0;
        }
        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            warn!("ignoring invalid frame time {}", dt);
            0.0
        };
        self.accumulated_time += dt;
        let mut steps = 0;
        while self.accumulated_time >= self.step_interval {
            self.accumulated_time -= self.step_interval;
            automaton.advance_generation();
            steps += 1;
        }
        if steps > 0 {
            trace!("advanced {} generations in {}s", steps, dt);
        }
        steps
    }
}
