use std::collections::HashSet;

use rand::Rng;

use crate::config::GridGeometry;
use crate::direction::Direction;
use crate::food::{generate_initial_foods, FoodItem};
use crate::geometry::Position;
use crate::level::{obstacles_for_level, ObstacleBlock};
use crate::snake::Snake;

/// Lifecycle phase of one game.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GamePhase {
    NotStarted,
    Running,
    Paused,
    GameOver,
}

/// What ended the game.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Collision {
    Wall,
    Obstacle,
    SelfBody,
}

/// Complete game state for one session at one level.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    /// Heading applied on the next tick.
    pub direction: Direction,
    pub foods: Vec<FoodItem>,
    pub obstacles: Vec<ObstacleBlock>,
    pub score: i64,
    /// Best score recorded for `level`, if any.
    pub high_score: Option<i64>,
    pub level: u32,
    pub phase: GamePhase,
    pub death_reason: Option<Collision>,
    geometry: GridGeometry,
}

impl GameState {
    /// Builds the initial state for `level`: spawn snake heading east,
    /// score 0, the level's obstacles and `food_count` fresh foods.
    #[must_use]
    pub fn new<R: Rng + ?Sized>(
        rng: &mut R,
        geometry: GridGeometry,
        level: u32,
        food_count: usize,
        high_score: Option<i64>,
    ) -> Self {
        let level = level.max(1);
        let snake = Snake::initial(geometry);
        let obstacles = obstacles_for_level(level, geometry);
        let reserved: HashSet<Position> = snake.positions().collect();
        let foods = generate_initial_foods(rng, geometry, food_count, &obstacles, &reserved);

        Self {
            snake,
            direction: Direction::East,
            foods,
            obstacles,
            score: 0,
            high_score,
            level,
            phase: GamePhase::NotStarted,
            death_reason: None,
            geometry,
        }
    }

    /// Returns the board geometry this state was built for.
    #[must_use]
    pub fn geometry(&self) -> GridGeometry {
        self.geometry
    }

    /// Returns true if an obstacle occupies `position`.
    #[must_use]
    pub fn has_obstacle_at(&self, position: Position) -> bool {
        self.obstacles.iter().any(|block| block.position == position)
    }

    /// Index of the food at `position`, if any.
    #[must_use]
    pub fn food_index_at(&self, position: Position) -> Option<usize> {
        self.foods.iter().position(|food| food.position == position)
    }

    /// Cells a replacement food must avoid: foods, obstacles and the snake.
    #[must_use]
    pub fn occupied_positions(&self) -> HashSet<Position> {
        self.foods
            .iter()
            .map(|food| food.position)
            .chain(self.obstacles.iter().map(|block| block.position))
            .chain(self.snake.positions())
            .collect()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }
}
