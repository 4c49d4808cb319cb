//! Error types for the wireworld engine.

use crate::GridPos;
use thiserror::Error;

/// Failure of a single cell edit. Edits are atomic, so the grid is untouched when one is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EditError {
    /// A cell already exists at the position. Callers usually want to cycle it instead.
    #[error("cell at {0:?} is already occupied")]
    AlreadyOccupied(GridPos),

    /// No cell exists at the position.
    #[error("no cell at {0:?}")]
    NotFound(GridPos),
}

/// Invalid configuration values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("cell pixel width must be positive, got {0}")]
    CellPixelWidth(i32),

    #[error("window size must be non-zero, got {width}x{height}")]
    WindowSize { width: u32, height: u32 },

    #[error("steps per second value {0} is not a power of two")]
    RateNotPowerOfTwo(f64),

    #[error("steps per second bounds out of order: min {min}, initial {initial}, max {max}")]
    RateBounds { min: f64, initial: f64, max: f64 },

    #[error("zoom bounds out of order or non-positive: min {min}, max {max}")]
    ZoomBounds { min: f64, max: f64 },

    #[error("zoom step must be finite and greater than one, got {0}")]
    ZoomStep(f64),
}

/// The neighbor graph disagrees with cell occupancy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// A neighbor slot is empty although the adjacent site is occupied, or the reverse.
    #[error("cell {cell:?} has a stale neighbor slot toward {neighbor:?}")]
    StaleNeighbor { cell: GridPos, neighbor: GridPos },

    /// A cell's stored position does not match its key.
    #[error("cell stored at {key:?} reports position {position:?}")]
    MisplacedCell { key: GridPos, position: GridPos },

    /// The chunk index disagrees with the cell map.
    #[error("chunk index out of sync at {0:?}")]
    ChunkIndex(GridPos),
}
