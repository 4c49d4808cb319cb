//! Wireworld on a sparse, unbounded grid.
//!
//! The crate holds everything below the window and the renderer:
//!
//! - [`Grid`] stores the live cells and keeps each cell's Moore neighborhood linked as cells are
//!   placed and erased.
//! - [`Automaton`] advances the grid one generation at a time and is the entry point for edits.
//! - [`Viewport`] pans and zooms over the world, converts between screen, surface and world
//!   coordinates and reports which cells are visible.
//! - [`StepScheduler`] turns variable frame times into a fixed number of generations per second.
//! - [`Simulation`] drives the three of them for one frame at a time.
//!
//! ```
//! use wireworld::{Automaton, CellState};
//!
//! let mut automaton = Automaton::new();
//! automaton.place((-1, 0), CellState::ElectronHead).unwrap();
//! automaton.place((0, 0), CellState::Conductor).unwrap();
//! automaton.advance_generation();
//! assert_eq!(automaton.grid().state((0, 0)), Some(CellState::ElectronHead));
//! ```

mod cell;
mod chunks;
mod config;
mod direction;
mod engine;
mod error;
mod grid;
mod neighborhood;
mod scheduler;
mod simulation;
mod viewport;

pub use cell::*;
pub use chunks::*;
pub use config::*;
pub use direction::*;
pub use engine::*;
pub use error::*;
pub use grid::*;
pub use neighborhood::*;
pub use scheduler::*;
pub use simulation::*;
pub use viewport::*;

/// Integer grid coordinate of a cell. The y axis points down.
pub type GridPos = (i64, i64);
