/// Compass heading of the snake on the board. North is towards `y = 0`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Returns the opposite heading.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
        }
    }

    /// Returns true for North and South.
    #[must_use]
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::North | Self::South)
    }

    /// Unit step `(dx, dy)` in cell counts.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::South => (0, 1),
            Self::East => (1, 0),
            Self::West => (-1, 0),
        }
    }
}

/// The four recognised directional keys. Any other key never reaches the
/// direction state machine.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum ArrowKey {
    Left,
    Right,
    Up,
    Down,
}

impl ArrowKey {
    fn heading(self) -> Direction {
        match self {
            Self::Left => Direction::West,
            Self::Right => Direction::East,
            Self::Up => Direction::North,
            Self::Down => Direction::South,
        }
    }
}

/// Maps the current heading and a key to the next heading.
///
/// Only turns onto the perpendicular axis are accepted; keys along the
/// current axis (same or reverse) leave the heading unchanged.
#[must_use]
pub fn next_direction(current: Direction, key: ArrowKey) -> Direction {
    let requested = key.heading();
    if requested.is_vertical() == current.is_vertical() {
        current
    } else {
        requested
    }
}
