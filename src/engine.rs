use crate::{CellState, CycleDirection, EditError, Grid, GridPos};
use log::{debug, info, trace};

/// Which pointer tool an edit is made with.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EditTool {
    /// Places conductors and cycles forward.
    Primary,
    /// Places electron heads and cycles backward.
    Secondary,
}

impl EditTool {
    /// State of a cell freshly placed with this tool.
    pub fn placed_state(self) -> CellState {
        match self {
            EditTool::Primary => CellState::Conductor,
            EditTool::Secondary => CellState::ElectronHead,
        }
    }

    pub fn cycle_direction(self) -> CycleDirection {
        match self {
            EditTool::Primary => CycleDirection::Forward,
            EditTool::Secondary => CycleDirection::Backward,
        }
    }
}

/// What an `Automaton::edit` call did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EditOutcome {
    Placed(CellState),
    Cycled(CellState),
    Removed,
}

/// Runs Wireworld over a `Grid`.
///
/// Every generation is computed in two phases: all next states are derived from the current
/// states only, then all of them are applied at once. No cell can observe a neighbor that already
/// advanced in the same generation.
#[derive(Clone, Debug, Default)]
pub struct Automaton {
    grid: Grid,
    generation: u64,
}

impl Automaton {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_grid(grid: Grid) -> Self {
        Automaton {
            grid,
            generation: 0,
        }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Generations advanced since creation or the last `clear`.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Advance every live cell by one generation.
    pub fn advance_generation(&mut self) {
        self.grid.prepare_all();
        let changed = self.grid.commit();
        self.generation += 1;
        trace!(
            "generation {}: {} of {} cells changed",
            self.generation,
            changed,
            self.grid.len()
        );
    }

    pub fn place(&mut self, pos: GridPos, state: CellState) -> Result<(), EditError> {
        self.grid.place(pos, state)?;
        debug!("placed {:?} at {:?}", state, pos);
        Ok(())
    }

    pub fn erase(&mut self, pos: GridPos) -> Result<(), EditError> {
        self.grid.erase(pos)?;
        debug!("erased {:?}", pos);
        Ok(())
    }

    /// Cycle the cell at `pos`. Returns the new state, or `None` if cycling removed the cell.
    pub fn cycle_state(
        &mut self,
        pos: GridPos,
        direction: CycleDirection,
    ) -> Result<Option<CellState>, EditError> {
        let state = self.grid.cycle_state(pos, direction)?;
        match state {
            Some(state) => debug!("cycled {:?} {:?} to {:?}", pos, direction, state),
            None => debug!("cycled {:?} {:?} out of existence", pos, direction),
        }
        Ok(state)
    }

    pub fn reset_electrified(&mut self) {
        let reset = self.grid.reset_electrified();
        info!("removed electricity from {} cells", reset);
    }

    pub fn clear(&mut self) {
        let removed = self.grid.len();
        self.grid.clear();
        self.generation = 0;
        info!("cleared {} cells", removed);
    }

    /// Place a cell if `pos` is empty, otherwise cycle the existing one.
    pub fn edit(&mut self, pos: GridPos, tool: EditTool) -> EditOutcome {
        if !self.grid.contains(pos) {
            let state = tool.placed_state();
            // The site is known to be empty, so placement cannot fail.
            if self.place(pos, state).is_ok() {
                return EditOutcome::Placed(state);
            }
        }
        match self.cycle_state(pos, tool.cycle_direction()) {
            Ok(Some(state)) => EditOutcome::Cycled(state),
            Ok(None) | Err(_) => EditOutcome::Removed,
        }
    }
}

/// A drag of the pointer with a tool held down.
///
/// Each cell is edited at most once per visit: holding still over a cell, or wiggling inside it,
/// does not keep cycling it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Stroke {
    tool: Option<EditTool>,
    last_edited: Option<GridPos>,
}

impl Stroke {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, tool: EditTool) {
        self.tool = Some(tool);
        self.last_edited = None;
    }

    pub fn end(&mut self) {
        self.tool = None;
        self.last_edited = None;
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.tool.is_some()
    }

    /// Edit `pos` if a stroke is active and `pos` is not the cell this stroke edited last.
    pub fn apply(&mut self, automaton: &mut Automaton, pos: GridPos) -> Option<EditOutcome> {
        let tool = self.tool?;
        if self.last_edited == Some(pos) {
            return None;
        }
        self.last_edited = Some(pos);
        Some(automaton.edit(pos, tool))
    }
}
