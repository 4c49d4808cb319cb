use crate::{GridPos, Neighbors};
use enum_iterator::IntoEnumIterator;
use glam::DVec2;

/// The three Wireworld states, in cycling order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, IntoEnumIterator)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    Conductor,
    ElectronHead,
    ElectronTail,
}

/// Which way `cycle_state` walks through the states.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CycleDirection {
    Forward,
    Backward,
}

impl CellState {
    /// The state this cell takes in the next generation, given how many of its neighbors are
    /// currently electron heads.
    #[inline]
    pub fn next_generation(self, head_neighbors: usize) -> CellState {
        match self {
            CellState::Conductor if (1..=2).contains(&head_neighbors) => CellState::ElectronHead,
            CellState::Conductor => CellState::Conductor,
            CellState::ElectronHead => CellState::ElectronTail,
            CellState::ElectronTail => CellState::Conductor,
        }
    }

    /// The neighboring state in cycling order, or `None` when stepping past either end.
    pub fn cycled(self, direction: CycleDirection) -> Option<CellState> {
        use CellState::*;
        match (self, direction) {
            (Conductor, CycleDirection::Forward) => Some(ElectronHead),
            (ElectronHead, CycleDirection::Forward) => Some(ElectronTail),
            (ElectronTail, CycleDirection::Forward) => None,
            (Conductor, CycleDirection::Backward) => None,
            (ElectronHead, CycleDirection::Backward) => Some(Conductor),
            (ElectronTail, CycleDirection::Backward) => Some(ElectronHead),
        }
    }

    #[inline]
    pub fn is_electrified(self) -> bool {
        self != CellState::Conductor
    }

    /// RGB color the renderer draws this state with.
    pub fn color(self) -> [u8; 3] {
        match self {
            CellState::Conductor => [184, 115, 51],
            CellState::ElectronHead => [0, 64, 255],
            CellState::ElectronTail => [255, 64, 0],
        }
    }

    /// Every state paired with its color, for building image caches.
    pub fn palette() -> impl Iterator<Item = (CellState, [u8; 3])> {
        CellState::into_enum_iter().map(|state| (state, state.color()))
    }
}

/// Axis-aligned rectangle on the zoomed surface. Half-open on the right and bottom edges.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ScreenRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ScreenRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        ScreenRect {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn min(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    #[inline]
    pub fn max(&self) -> DVec2 {
        DVec2::new(self.x + self.width, self.y + self.height)
    }

    #[inline]
    pub fn intersects(&self, other: &ScreenRect) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x < b_max.x && b_min.x < a_max.x && a_min.y < b_max.y && b_min.y < a_max.y
    }

    #[inline]
    pub fn contains(&self, point: DVec2) -> bool {
        let (min, max) = (self.min(), self.max());
        point.x >= min.x && point.x < max.x && point.y >= min.y && point.y < max.y
    }
}

/// One occupied grid site.
///
/// Neighbors are held as grid keys and resolved through the owning `Grid`, so cells never own
/// each other.
#[derive(Clone, Debug)]
pub struct Cell {
    position: GridPos,
    pub(crate) state: CellState,
    pub(crate) next_state: CellState,
    pub(crate) neighbors: Neighbors<Option<GridPos>>,
    pub(crate) screen_rect: Option<ScreenRect>,
}

impl Cell {
    pub(crate) fn new(position: GridPos, state: CellState) -> Self {
        Cell {
            position,
            state,
            next_state: state,
            neighbors: Neighbors::default(),
            screen_rect: None,
        }
    }

    #[inline]
    pub fn position(&self) -> GridPos {
        self.position
    }

    #[inline]
    pub fn state(&self) -> CellState {
        self.state
    }

    /// The state staged by the last prepare pass. Equal to `state` outside of a generation advance.
    #[inline]
    pub fn next_state(&self) -> CellState {
        self.next_state
    }

    #[inline]
    pub fn neighbors(&self) -> &Neighbors<Option<GridPos>> {
        &self.neighbors
    }

    /// Screen rectangle cached by the last viewport refresh.
    #[inline]
    pub fn screen_rect(&self) -> Option<ScreenRect> {
        self.screen_rect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use CellState::*;

    #[test]
    fn state_colors() {
        assert_eq!(Conductor.color(), [184, 115, 51]);
        assert_eq!(ElectronHead.color(), [0, 64, 255]);
        assert_eq!(ElectronTail.color(), [255, 64, 0]);
        assert_eq!(
            CellState::palette().collect::<Vec<_>>(),
            vec![
                (Conductor, [184, 115, 51]),
                (ElectronHead, [0, 64, 255]),
                (ElectronTail, [255, 64, 0]),
            ]
        );
    }

    #[test]
    fn transition_table() {
        assert_eq!(Conductor.next_generation(0), Conductor);
        assert_eq!(Conductor.next_generation(1), ElectronHead);
        assert_eq!(Conductor.next_generation(2), ElectronHead);
        for n in 3..=8 {
            assert_eq!(Conductor.next_generation(n), Conductor);
        }
        for n in 0..=8 {
            assert_eq!(ElectronHead.next_generation(n), ElectronTail);
            assert_eq!(ElectronTail.next_generation(n), Conductor);
        }
    }

    #[test]
    fn cycling_falls_off_both_ends() {
        assert_eq!(Conductor.cycled(CycleDirection::Forward), Some(ElectronHead));
        assert_eq!(ElectronTail.cycled(CycleDirection::Forward), None);
        assert_eq!(ElectronTail.cycled(CycleDirection::Backward), Some(ElectronHead));
        assert_eq!(Conductor.cycled(CycleDirection::Backward), None);
    }

    #[test]
    fn rect_edges_are_half_open() {
        let a = ScreenRect::new(0.0, 0.0, 20.0, 20.0);
        let b = ScreenRect::new(20.0, 0.0, 20.0, 20.0);
        assert!(!a.intersects(&b));
        assert!(a.intersects(&ScreenRect::new(19.5, 19.5, 1.0, 1.0)));
        assert!(a.contains(DVec2::new(0.0, 19.9)));
        assert!(!a.contains(DVec2::new(20.0, 5.0)));
    }
}
