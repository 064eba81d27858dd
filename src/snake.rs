use std::collections::VecDeque;

use crate::config::{GridGeometry, INITIAL_SNAKE_LENGTH, MIN_SNAKE_LENGTH};
use crate::direction::Direction;
use crate::geometry::Position;

/// Role of a segment within the snake, used for rendering.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SegmentRole {
    Head,
    Body,
    Tail,
}

/// One cell of the snake.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct SnakeSegment {
    pub position: Position,
    pub role: SegmentRole,
    pub heading: Direction,
    /// Rotation delta in degrees applied when this segment became the head.
    pub turn_angle: i16,
    /// Set on the head for the tick in which it ate.
    pub just_ate: bool,
}

/// Ordered segment list; the front is the head, the back is the tail.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    segments: VecDeque<SnakeSegment>,
}

impl Snake {
    /// Creates the spawn snake: a straight line along row 0 heading east,
    /// with the tail at the origin.
    #[must_use]
    pub fn initial(geometry: GridGeometry) -> Self {
        let length = i32::try_from(INITIAL_SNAKE_LENGTH).unwrap_or(i32::MAX);
        let positions = (0..length)
            .rev()
            .map(|column| Position::new(column * geometry.cell_size, 0))
            .collect();
        Self::from_positions(positions, Direction::East)
    }

    /// Creates a snake from explicit positions (first is head), all sharing `heading`.
    ///
    /// # Panics
    ///
    /// Panics if `positions` is empty.
    #[must_use]
    pub fn from_positions(positions: Vec<Position>, heading: Direction) -> Self {
        assert!(!positions.is_empty(), "snake needs at least one segment");

        let segments = positions
            .into_iter()
            .map(|position| SnakeSegment {
                position,
                role: SegmentRole::Body,
                heading,
                turn_angle: 0,
                just_ate: false,
            })
            .collect();
        let mut snake = Self { segments };
        snake.assign_roles();
        snake
    }

    /// Moves the head to `new_head`, dropping the tail unless `grow` is set.
    pub fn advance(&mut self, new_head: Position, heading: Direction, grow: bool) {
        let old_heading = self.head_segment().heading;
        for segment in &mut self.segments {
            segment.just_ate = false;
        }

        self.segments.push_front(SnakeSegment {
            position: new_head,
            role: SegmentRole::Head,
            heading,
            turn_angle: turn_angle(old_heading, heading),
            just_ate: false,
        });
        if !grow {
            let _ = self.segments.pop_back();
        }
        self.assign_roles();
    }

    /// Drops the tail segment. Returns false, leaving the snake untouched,
    /// when it is already at the minimum length.
    pub fn shrink(&mut self) -> bool {
        if self.segments.len() <= MIN_SNAKE_LENGTH {
            return false;
        }

        let _ = self.segments.pop_back();
        self.assign_roles();
        true
    }

    /// Flags the head as having just eaten.
    pub fn mark_just_ate(&mut self) {
        if let Some(head) = self.segments.front_mut() {
            head.just_ate = true;
        }
    }

    /// Returns the head segment.
    #[must_use]
    pub fn head_segment(&self) -> &SnakeSegment {
        self.segments
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns the head position.
    #[must_use]
    pub fn head(&self) -> Position {
        self.head_segment().position
    }

    /// Returns the heading of the head segment.
    #[must_use]
    pub fn heading(&self) -> Direction {
        self.head_segment().heading
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.segments.iter().any(|segment| segment.position == position)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterates over segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &SnakeSegment> {
        self.segments.iter()
    }

    /// Iterates over segment positions from head to tail.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.segments.iter().map(|segment| segment.position)
    }

    fn assign_roles(&mut self) {
        let last = self.segments.len().saturating_sub(1);
        for (index, segment) in self.segments.iter_mut().enumerate() {
            segment.role = if index == 0 {
                SegmentRole::Head
            } else if index == last {
                SegmentRole::Tail
            } else {
                SegmentRole::Body
            };
        }
    }
}

/// Returns `head` moved one cell along `direction`.
#[must_use]
pub fn step_head(head: Position, direction: Direction, cell_size: i32) -> Position {
    let (dx, dy) = direction.delta();
    Position {
        x: head.x + dx * cell_size,
        y: head.y + dy * cell_size,
    }
}

/// Rendering rotation in degrees for a heading change: clockwise turns
/// are positive, reversals are 180.
#[must_use]
pub fn turn_angle(old_heading: Direction, new_heading: Direction) -> i16 {
    if old_heading == new_heading {
        return 0;
    }
    if old_heading.opposite() == new_heading {
        return 180;
    }

    match (old_heading, new_heading) {
        (Direction::North, Direction::East)
        | (Direction::East, Direction::South)
        | (Direction::South, Direction::West)
        | (Direction::West, Direction::North) => 90,
        _ => -90,
    }
}
