use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use crate::config::{GridGeometry, INITIAL_SNAKE_LENGTH};
use crate::geometry::{random_unique_position, Position};
use crate::level::{level_count, obstacles_for_level, ObstacleBlock};

/// Catalogue of food kinds. The kind is the canonical identity of a food.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum FoodKind {
    Apple,
    Banana,
    Egg,
    Pear,
    Strawberry,
    Stone,
    Medicine,
}

impl FoodKind {
    pub const ALL: [Self; 7] = [
        Self::Apple,
        Self::Banana,
        Self::Egg,
        Self::Pear,
        Self::Strawberry,
        Self::Stone,
        Self::Medicine,
    ];

    /// Score change applied when this food is eaten. May be negative.
    #[must_use]
    pub fn score_delta(self) -> i64 {
        match self {
            Self::Apple => 2,
            Self::Egg => 3,
            Self::Banana => 4,
            Self::Pear => 5,
            Self::Strawberry => 6,
            Self::Stone => -10,
            Self::Medicine => 10,
        }
    }

    /// Key the renderer uses to look up the asset for this kind.
    #[must_use]
    pub fn asset_key(self) -> &'static str {
        match self {
            Self::Apple => "apple",
            Self::Banana => "banana",
            Self::Egg => "egg",
            Self::Pear => "pear",
            Self::Strawberry => "strawberry",
            Self::Stone => "stone",
            Self::Medicine => "medicine",
        }
    }

    /// Returns true for the kind that shrinks the snake instead of growing it.
    #[must_use]
    pub fn is_shrink(self) -> bool {
        self == Self::Medicine
    }
}

/// Food entity currently on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct FoodItem {
    pub position: Position,
    pub kind: FoodKind,
}

impl FoodItem {
    #[must_use]
    pub fn new(position: Position, kind: FoodKind) -> Self {
        Self { position, kind }
    }
}

/// Requested food count leaves too little free space on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
#[error("{requested} food items do not fit on this board (at most {max})")]
pub struct FoodCountError {
    pub requested: usize,
    pub max: usize,
}

/// Largest food count that keeps foods to at most half of the cells left
/// free by the busiest level layout and the spawn snake.
#[must_use]
pub fn max_food_count(geometry: GridGeometry) -> usize {
    let busiest_level = (1..=level_count())
        .map(|level| obstacles_for_level(level, geometry).len())
        .max()
        .unwrap_or(0);

    geometry
        .total_cells()
        .saturating_sub(busiest_level + INITIAL_SNAKE_LENGTH)
        / 2
}

/// Accepts `count` only when it stays within [`max_food_count`].
pub fn check_food_count(count: usize, geometry: GridGeometry) -> Result<usize, FoodCountError> {
    let max = max_food_count(geometry);
    if count > max {
        return Err(FoodCountError {
            requested: count,
            max,
        });
    }
    Ok(count)
}

/// Picks a kind uniformly and places it outside `occupied`.
#[must_use]
pub fn generate_food_item<R: Rng + ?Sized>(
    rng: &mut R,
    geometry: GridGeometry,
    occupied: &HashSet<Position>,
) -> FoodItem {
    let kind = *FoodKind::ALL.choose(rng).unwrap_or(&FoodKind::Apple);
    let position = random_unique_position(rng, geometry, occupied);
    FoodItem { position, kind }
}

/// Generates `count` foods that overlap neither each other nor `obstacles`.
///
/// `reserved` holds any further cells to keep clear, such as the snake.
#[must_use]
pub fn generate_initial_foods<R: Rng + ?Sized>(
    rng: &mut R,
    geometry: GridGeometry,
    count: usize,
    obstacles: &[ObstacleBlock],
    reserved: &HashSet<Position>,
) -> Vec<FoodItem> {
    let mut occupied: HashSet<Position> = obstacles.iter().map(|block| block.position).collect();
    occupied.extend(reserved.iter().copied());

    let mut foods = Vec::with_capacity(count);
    for _ in 0..count {
        let food = generate_food_item(rng, geometry, &occupied);
        occupied.insert(food.position);
        foods.push(food);
    }
    foods
}
