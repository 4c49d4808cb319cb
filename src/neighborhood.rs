use crate::{Direction, GridPos};
use std::ops::{Index, IndexMut};
use Direction::*;

/// One slot per Moore direction.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Neighbors<T> {
    pub right: T,
    pub up_right: T,
    pub up: T,
    pub up_left: T,
    pub left: T,
    pub down_left: T,
    pub down: T,
    pub down_right: T,
}

impl<T> Neighbors<T> {
    /// Fill every slot by evaluating `f` on its direction.
    #[inline]
    pub fn new<F: FnMut(Direction) -> T>(mut f: F) -> Neighbors<T> {
        Neighbors {
            right: f(Right),
            up_right: f(UpRight),
            up: f(Up),
            up_left: f(UpLeft),
            left: f(Left),
            down_left: f(DownLeft),
            down: f(Down),
            down_right: f(DownRight),
        }
    }

    /// Iterate over all slots.
    #[inline]
    pub fn iter(self) -> std::array::IntoIter<T, 8> {
        [
            self.right,
            self.up_right,
            self.up,
            self.up_left,
            self.left,
            self.down_left,
            self.down,
            self.down_right,
        ]
        .into_iter()
    }

    /// Iterate over all slots with their directions.
    #[inline]
    pub fn dir_iter(self) -> impl Iterator<Item = (Direction, T)> {
        Direction::all().zip(self.iter())
    }
}

impl Neighbors<Option<GridPos>> {
    /// Keys of the occupied neighbor sites.
    #[inline]
    pub fn occupied(&self) -> impl Iterator<Item = GridPos> {
        self.iter().flatten()
    }
}

impl<T> Index<Direction> for Neighbors<T> {
    type Output = T;
    #[inline]
    fn index(&self, ix: Direction) -> &T {
        match ix {
            Right => &self.right,
            UpRight => &self.up_right,
            Up => &self.up,
            UpLeft => &self.up_left,
            Left => &self.left,
            DownLeft => &self.down_left,
            Down => &self.down,
            DownRight => &self.down_right,
        }
    }
}

impl<T> IndexMut<Direction> for Neighbors<T> {
    #[inline]
    fn index_mut(&mut self, ix: Direction) -> &mut T {
        match ix {
            Right => &mut self.right,
            UpRight => &mut self.up_right,
            Up => &mut self.up,
            UpLeft => &mut self.up_left,
            Left => &mut self.left,
            DownLeft => &mut self.down_left,
            Down => &mut self.down,
            DownRight => &mut self.down_right,
        }
    }
}
