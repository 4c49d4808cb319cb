//! Tunable constants of the engine, viewport and scheduler.

use crate::ConfigError;
use boolinator::Boolinator;

/// Grid pitch in world pixels.
pub const DEFAULT_CELL_PIXEL_WIDTH: i32 = 20;
/// One pixel wider and taller than a whole number of cells, so the last grid lines stay visible.
pub const DEFAULT_WINDOW_SIZE: (u32, u32) = (1001, 801);

pub const BACKGROUND_COLOR: [u8; 3] = [32, 32, 32];
pub const GRID_COLOR: [u8; 3] = [64, 64, 64];
pub const MOUSE_HIGHLIGHT_COLOR: [u8; 3] = [0, 255, 0];

/// Simulation rate bounds, in steps per second. All three must be powers of two.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SchedulerConfig {
    pub sps_initial: f64,
    pub sps_min: f64,
    pub sps_max: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        SchedulerConfig {
            sps_initial: 4.0,
            sps_min: 1.0,
            sps_max: 256.0,
        }
    }
}

impl SchedulerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for sps in [self.sps_initial, self.sps_min, self.sps_max] {
            is_power_of_two(sps).as_result((), ConfigError::RateNotPowerOfTwo(sps))?;
        }
        (self.sps_min <= self.sps_initial && self.sps_initial <= self.sps_max).as_result(
            (),
            ConfigError::RateBounds {
                min: self.sps_min,
                initial: self.sps_initial,
                max: self.sps_max,
            },
        )
    }
}

/// Zoom factor bounds and the multiplier applied per zoom step.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoomConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        ZoomConfig {
            min: 0.25,
            max: 4.0,
            step: 1.25,
        }
    }
}

impl ZoomConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        // The unit zoom must stay reachable, since that is where a fresh viewport starts.
        let ordered = self.min > 0.0 && self.min <= 1.0 && 1.0 <= self.max;
        (ordered && self.max.is_finite()).as_result(
            (),
            ConfigError::ZoomBounds {
                min: self.min,
                max: self.max,
            },
        )?;
        (self.step.is_finite() && self.step > 1.0).as_result((), ConfigError::ZoomStep(self.step))
    }

    /// Clamp a zoom factor into bounds.
    #[inline]
    pub fn clamp(&self, zoom: f64) -> f64 {
        zoom.max(self.min).min(self.max)
    }
}

/// Everything needed to build a `Simulation`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    pub cell_pixel_width: i32,
    pub window_size: (u32, u32),
    pub scheduler: SchedulerConfig,
    pub zoom: ZoomConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            cell_pixel_width: DEFAULT_CELL_PIXEL_WIDTH,
            window_size: DEFAULT_WINDOW_SIZE,
            scheduler: SchedulerConfig::default(),
            zoom: ZoomConfig::default(),
        }
    }
}

impl Config {
    /// Default configuration for a window of the given size.
    pub fn with_window_size(width: u32, height: u32) -> Result<Self, ConfigError> {
        let config = Config {
            window_size: (width, height),
            ..Config::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        (self.cell_pixel_width > 0)
            .as_result((), ConfigError::CellPixelWidth(self.cell_pixel_width))?;
        let (width, height) = self.window_size;
        (width > 0 && height > 0).as_result((), ConfigError::WindowSize { width, height })?;
        self.scheduler.validate()?;
        self.zoom.validate()
    }
}

fn is_power_of_two(value: f64) -> bool {
    value.is_finite() && value > 0.0 && value.log2().fract() == 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        Config::default().validate().unwrap();
    }

    #[test]
    fn frame_colors() {
        assert_eq!(BACKGROUND_COLOR, [32, 32, 32]);
        assert_eq!(GRID_COLOR, [64, 64, 64]);
        assert_eq!(MOUSE_HIGHLIGHT_COLOR, [0, 255, 0]);
    }

    #[test]
    fn rejects_bad_rates() {
        let scheduler = SchedulerConfig {
            sps_initial: 3.0,
            ..SchedulerConfig::default()
        };
        assert_eq!(scheduler.validate(), Err(ConfigError::RateNotPowerOfTwo(3.0)));

        let scheduler = SchedulerConfig {
            sps_initial: 512.0,
            ..SchedulerConfig::default()
        };
        assert!(matches!(scheduler.validate(), Err(ConfigError::RateBounds { .. })));
    }

    #[test]
    fn rejects_bad_window_and_zoom() {
        assert_eq!(
            Config::with_window_size(0, 10),
            Err(ConfigError::WindowSize { width: 0, height: 10 })
        );
        let config = Config {
            zoom: ZoomConfig {
                step: 1.0,
                ..ZoomConfig::default()
            },
            ..Config::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZoomStep(1.0)));
    }
}
