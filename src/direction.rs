use crate::GridPos;
use enum_iterator::IntoEnumIterator;
use Direction::*;

/// One of the eight Moore directions.
///
/// Directions rotate counter-clockwise in declaration order, so the opposite of a direction is
/// always four steps away. The y axis points down the screen, which makes `Up` a negative y delta.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, IntoEnumIterator)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Right,
    UpRight,
    Up,
    UpLeft,
    Left,
    DownLeft,
    Down,
    DownRight,
}

impl Direction {
    /// Number of directions in the neighborhood.
    pub const TOTAL: usize = 8;

    /// An iterator over all directions, counter-clockwise starting at `Right`.
    #[inline]
    pub fn all() -> impl Iterator<Item = Direction> {
        Direction::into_enum_iter()
    }

    /// The grid offset of this direction.
    #[inline]
    pub fn delta(self) -> (i64, i64) {
        match self {
            Right => (1, 0),
            UpRight => (1, -1),
            Up => (0, -1),
            UpLeft => (-1, -1),
            Left => (-1, 0),
            DownLeft => (-1, 1),
            Down => (0, 1),
            DownRight => (1, 1),
        }
    }

    /// The direction pointing the opposite way.
    #[inline]
    pub fn inv(self) -> Direction {
        match self {
            Right => Left,
            UpRight => DownLeft,
            Up => Down,
            UpLeft => DownRight,
            Left => Right,
            DownLeft => UpRight,
            Down => Up,
            DownRight => UpLeft,
        }
    }

    /// The position one step from `pos` in this direction.
    #[inline]
    pub fn offset(self, pos: GridPos) -> GridPos {
        let (dx, dy) = self.delta();
        (pos.0 + dx, pos.1 + dy)
    }
}

impl From<Direction> for usize {
    #[inline]
    fn from(dir: Direction) -> usize {
        match dir {
            Right => 0,
            UpRight => 1,
            Up => 2,
            UpLeft => 3,
            Left => 4,
            DownLeft => 5,
            Down => 6,
            DownRight => 7,
        }
    }
}
