use crate::{
    Cell, CellState, ChunkIndex, CycleDirection, Direction, EditError, GridError, GridPos,
};

use boolinator::Boolinator;
use rayon::iter::{IntoParallelRefIterator, IntoParallelRefMutIterator, ParallelIterator};
use std::collections::{HashMap, HashSet};
use std::mem;

/// Sparse, unbounded collection of cells.
///
/// The grid exclusively owns every `Cell`. Adjacency is kept as grid keys inside each cell and is
/// patched incrementally on every insertion and deletion, touching at most the eight sites around
/// the edited position.
#[derive(Clone, Debug, Default)]
pub struct Grid {
    cells: HashMap<GridPos, Cell>,
    chunks: ChunkIndex,
    uncached: HashSet<GridPos>,
}

impl Grid {
    /// Make a new empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make a grid from a collection of positions with their initial states.
    pub fn from_cells<I>(cells: I) -> Result<Self, EditError>
    where
        I: IntoIterator<Item = (GridPos, CellState)>,
    {
        let mut grid = Self::new();
        for (pos, state) in cells {
            grid.place(pos, state)?;
        }
        Ok(grid)
    }

    /// Create a cell at `pos` and link it with every occupied neighbor site.
    pub fn place(&mut self, pos: GridPos, state: CellState) -> Result<(), EditError> {
        if self.cells.contains_key(&pos) {
            return Err(EditError::AlreadyOccupied(pos));
        }
        let mut cell = Cell::new(pos, state);
        for dir in Direction::all() {
            let neighbor_pos = dir.offset(pos);
            if let Some(neighbor) = self.cells.get_mut(&neighbor_pos) {
                neighbor.neighbors[dir.inv()] = Some(pos);
                cell.neighbors[dir] = Some(neighbor_pos);
            }
        }
        self.cells.insert(pos, cell);
        self.chunks.insert(pos);
        self.uncached.insert(pos);
        Ok(())
    }

    /// Remove the cell at `pos` and drop every back-reference to it.
    pub fn erase(&mut self, pos: GridPos) -> Result<(), EditError> {
        self.remove(pos).map(drop)
    }

    fn remove(&mut self, pos: GridPos) -> Result<Cell, EditError> {
        let cell = self.cells.remove(&pos).ok_or(EditError::NotFound(pos))?;
        for (dir, neighbor_pos) in cell.neighbors.dir_iter() {
            if let Some(neighbor) = neighbor_pos.and_then(|p| self.cells.get_mut(&p)) {
                neighbor.neighbors[dir.inv()] = None;
            }
        }
        self.chunks.remove(pos);
        self.uncached.remove(&pos);
        Ok(cell)
    }

    /// Walk the cell at `pos` one state along `direction`.
    ///
    /// Stepping past either end of the state order deletes the cell, exactly as `erase` would.
    /// Returns the new state, or `None` if the cell was deleted.
    pub fn cycle_state(
        &mut self,
        pos: GridPos,
        direction: CycleDirection,
    ) -> Result<Option<CellState>, EditError> {
        let cell = self.cells.get_mut(&pos).ok_or(EditError::NotFound(pos))?;
        match cell.state.cycled(direction) {
            Some(state) => {
                cell.state = state;
                cell.next_state = state;
                Ok(Some(state))
            }
            None => self.erase(pos).map(|()| None),
        }
    }

    /// Turn every electron head and tail back into a conductor. Returns how many cells changed.
    pub fn reset_electrified(&mut self) -> usize {
        let mut reset = 0;
        for cell in self.cells.values_mut() {
            if cell.state.is_electrified() {
                cell.state = CellState::Conductor;
                cell.next_state = CellState::Conductor;
                reset += 1;
            }
        }
        reset
    }

    /// Delete every cell.
    pub fn clear(&mut self) {
        // Nothing outside the grid holds on to individual cells, so the map can be swapped out.
        drop(mem::take(&mut self.cells));
        self.chunks.clear();
        self.uncached.clear();
    }

    /// Get a &Cell if `pos` is occupied.
    #[inline]
    pub fn get(&self, pos: GridPos) -> Option<&Cell> {
        self.cells.get(&pos)
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, pos: GridPos) -> Option<&mut Cell> {
        self.cells.get_mut(&pos)
    }

    /// Get the state of the cell at `pos` if it is occupied.
    #[inline]
    pub fn state(&self, pos: GridPos) -> Option<CellState> {
        self.cells.get(&pos).map(Cell::state)
    }

    #[inline]
    pub fn contains(&self, pos: GridPos) -> bool {
        self.cells.contains_key(&pos)
    }

    /// Number of live cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate over all live cells in no particular order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.values()
    }

    pub(crate) fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.values_mut()
    }

    /// Iterate over all occupied positions in no particular order.
    pub fn positions(&self) -> impl Iterator<Item = GridPos> + '_ {
        self.cells.keys().copied()
    }

    /// Live cells whose positions lie in the inclusive range `min..=max`.
    pub fn cells_in_range(&self, min: GridPos, max: GridPos) -> impl Iterator<Item = &Cell> {
        self.chunks
            .range(min, max)
            .into_iter()
            .filter_map(move |pos| self.cells.get(&pos))
    }

    /// The chunk index over occupied positions.
    pub fn chunks(&self) -> &ChunkIndex {
        &self.chunks
    }

    /// Live positions placed since the last call, for incremental screen caching.
    pub(crate) fn take_uncached(&mut self) -> HashSet<GridPos> {
        mem::take(&mut self.uncached)
    }

    /// Number of electron heads adjacent to the cell at `pos`.
    pub fn head_neighbor_count(&self, pos: GridPos) -> Option<usize> {
        self.cells.get(&pos).map(|cell| self.heads_around(cell))
    }

    #[inline]
    fn heads_around(&self, cell: &Cell) -> usize {
        cell.neighbors
            .occupied()
            .filter_map(|pos| self.cells.get(&pos))
            .filter(|neighbor| neighbor.state == CellState::ElectronHead)
            .count()
    }

    /// Stage `next_state` for the listed cells, in the given order.
    ///
    /// Only current states are read, so the order never affects the outcome. Unoccupied positions
    /// are skipped.
    pub fn prepare<I>(&mut self, order: I)
    where
        I: IntoIterator<Item = GridPos>,
    {
        for pos in order {
            let next = match self.cells.get(&pos) {
                Some(cell) => cell.state.next_generation(self.heads_around(cell)),
                None => continue,
            };
            if let Some(cell) = self.cells.get_mut(&pos) {
                cell.next_state = next;
            }
        }
    }

    /// Stage `next_state` for every cell, computing in parallel.
    pub fn prepare_all(&mut self) {
        let grid = &*self;
        let staged: Vec<(GridPos, CellState)> = grid
            .cells
            .par_iter()
            .map(|(&pos, cell)| (pos, cell.state.next_generation(grid.heads_around(cell))))
            .collect();
        for (pos, next) in staged {
            if let Some(cell) = self.cells.get_mut(&pos) {
                cell.next_state = next;
            }
        }
    }

    /// Apply every staged `next_state`. Returns how many cells changed state.
    pub fn commit(&mut self) -> usize {
        self.cells
            .par_iter_mut()
            .map(|(_, cell)| {
                let changed = cell.state != cell.next_state;
                cell.state = cell.next_state;
                changed
            })
            .filter(|&changed| changed)
            .count()
    }

    /// Verify that every neighbor slot matches occupancy and that the chunk index matches the
    /// cell map.
    pub fn check_consistency(&self) -> Result<(), GridError> {
        for (&key, cell) in &self.cells {
            if cell.position() != key {
                return Err(GridError::MisplacedCell {
                    key,
                    position: cell.position(),
                });
            }
            if !self.chunks.contains(key) {
                return Err(GridError::ChunkIndex(key));
            }
            for (dir, slot) in cell.neighbors.dir_iter() {
                let neighbor = dir.offset(key);
                let expected = self.cells.contains_key(&neighbor).as_some(neighbor);
                if slot != expected {
                    return Err(GridError::StaleNeighbor {
                        cell: key,
                        neighbor,
                    });
                }
            }
        }
        if self.chunks.len() != self.cells.len() {
            return Err(GridError::ChunkIndex(
                self.chunks
                    .range((i64::MIN, i64::MIN), (i64::MAX, i64::MAX))
                    .into_iter()
                    .find(|pos| !self.cells.contains_key(pos))
                    .unwrap_or_default(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use CellState::*;

    #[test]
    fn place_links_both_sides() {
        let mut grid = Grid::new();
        grid.place((0, 0), Conductor).unwrap();
        grid.place((1, 1), Conductor).unwrap();
        assert_eq!(grid.get((0, 0)).unwrap().neighbors()[Direction::DownRight], Some((1, 1)));
        assert_eq!(grid.get((1, 1)).unwrap().neighbors()[Direction::UpLeft], Some((0, 0)));
        grid.check_consistency().unwrap();
    }

    #[test]
    fn place_refuses_occupied() {
        let mut grid = Grid::new();
        grid.place((2, 2), ElectronHead).unwrap();
        assert_eq!(
            grid.place((2, 2), Conductor),
            Err(EditError::AlreadyOccupied((2, 2)))
        );
        assert_eq!(grid.state((2, 2)), Some(ElectronHead));
    }

    #[test]
    fn erase_missing_is_not_found() {
        let mut grid = Grid::new();
        assert_eq!(grid.erase((0, 0)), Err(EditError::NotFound((0, 0))));
    }

    #[test]
    fn reset_keeps_cells_and_adjacency() {
        let mut grid =
            Grid::from_cells(vec![((0, 0), ElectronHead), ((1, 0), ElectronTail), ((2, 0), Conductor)])
                .unwrap();
        assert_eq!(grid.reset_electrified(), 2);
        assert_eq!(grid.len(), 3);
        assert!(grid.cells().all(|c| c.state() == Conductor && c.next_state() == Conductor));
        grid.check_consistency().unwrap();
    }

    #[test]
    fn clear_empties_index() {
        let mut grid = Grid::from_cells((0..40).map(|x| ((x, -x), Conductor))).unwrap();
        grid.clear();
        assert!(grid.is_empty());
        assert!(grid.chunks().is_empty());
        assert!(grid.take_uncached().is_empty());
    }

    #[test]
    fn uncached_tracks_only_live_cells() {
        let mut grid = Grid::new();
        for _ in 0..10_000 {
            grid.place((0, 0), Conductor).unwrap();
            grid.erase((0, 0)).unwrap();
        }
        assert!(grid.take_uncached().is_empty());

        grid.place((0, 0), Conductor).unwrap();
        grid.place((1, 0), ElectronHead).unwrap();
        grid.cycle_state((1, 0), CycleDirection::Forward).unwrap();
        grid.cycle_state((1, 0), CycleDirection::Forward).unwrap();
        grid.erase((0, 0)).unwrap();
        grid.place((0, 0), ElectronTail).unwrap();
        assert_eq!(grid.take_uncached(), [(0, 0)].into_iter().collect());
        assert!(grid.take_uncached().is_empty());
    }
}
