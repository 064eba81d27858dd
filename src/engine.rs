use log::debug;
use rand::Rng;

use crate::food::{generate_food_item, FoodKind};
use crate::game::{Collision, GamePhase, GameState};
use crate::geometry::Position;
use crate::snake::step_head;

/// Result of one simulation step.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickEvent {
    /// The game was not running; nothing changed.
    Idle,
    Moved,
    Ate(FoodKind),
    Collided(Collision),
}

/// Runs one tick against `state` and returns the next state.
///
/// Collisions are checked against the pre-move snake in the order wall,
/// obstacle, self. A collision leaves the snake where it was and ends the
/// game. Eating replaces the food 1:1, grows the snake by one, or shrinks it
/// by one for the shrink kind.
#[must_use]
pub fn step<R: Rng + ?Sized>(state: &GameState, rng: &mut R) -> (GameState, TickEvent) {
    let mut next = state.clone();
    if next.phase != GamePhase::Running {
        return (next, TickEvent::Idle);
    }

    let geometry = next.geometry();
    let heading = next.direction;
    let new_head = step_head(next.snake.head(), heading, geometry.cell_size);

    if let Some(collision) = detect_collision(&next, new_head) {
        debug!("collision {collision:?} at ({}, {})", new_head.x, new_head.y);
        next.phase = GamePhase::GameOver;
        next.death_reason = Some(collision);
        return (next, TickEvent::Collided(collision));
    }

    let Some(index) = next.food_index_at(new_head) else {
        next.snake.advance(new_head, heading, false);
        return (next, TickEvent::Moved);
    };

    let food = next.foods.remove(index);
    next.score += food.kind.score_delta();

    if food.kind.is_shrink() {
        next.snake.advance(new_head, heading, false);
        let _ = next.snake.shrink();
    } else {
        next.snake.advance(new_head, heading, true);
    }
    next.snake.mark_just_ate();

    let occupied = next.occupied_positions();
    next.foods.push(generate_food_item(rng, geometry, &occupied));

    debug!(
        "ate {:?}, score {} length {}",
        food.kind,
        next.score,
        next.snake.len()
    );
    (next, TickEvent::Ate(food.kind))
}

/// Returns the collision the head would suffer at `new_head`, if any.
#[must_use]
pub fn detect_collision(state: &GameState, new_head: Position) -> Option<Collision> {
    if !new_head.is_within_bounds(state.geometry()) {
        return Some(Collision::Wall);
    }
    if state.has_obstacle_at(new_head) {
        return Some(Collision::Obstacle);
    }
    if state.snake.occupies(new_head) {
        return Some(Collision::SelfBody);
    }
    None
}

/// Raises the level high score to the current score when it beats it, or
/// when none is recorded. Returns the value to persist.
pub fn settle_high_score(state: &mut GameState) -> Option<i64> {
    match state.high_score {
        Some(best) if state.score <= best => None,
        _ => {
            state.high_score = Some(state.score);
            Some(state.score)
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::{settle_high_score, step, TickEvent};
    use crate::config::GridGeometry;
    use crate::direction::Direction;
    use crate::food::{FoodItem, FoodKind};
    use crate::game::{Collision, GamePhase, GameState};
    use crate::geometry::Position;
    use crate::level::ObstacleBlock;
    use crate::snake::Snake;

    fn running_state(snake: &[(i32, i32)], direction: Direction) -> GameState {
        let mut rng = StdRng::seed_from_u64(99);
        let mut state = GameState::new(&mut rng, GridGeometry::default(), 1, 0, None);
        state.snake = Snake::from_positions(
            snake.iter().map(|(x, y)| Position::new(*x, *y)).collect(),
            direction,
        );
        state.direction = direction;
        state.phase = GamePhase::Running;
        state
    }

    #[test]
    fn plain_move_shifts_the_snake_one_cell() {
        let state = running_state(&[(40, 0), (20, 0), (0, 0)], Direction::East);
        let mut rng = StdRng::seed_from_u64(1);

        let (next, event) = step(&state, &mut rng);

        assert_eq!(event, TickEvent::Moved);
        let positions: Vec<_> = next.snake.positions().collect();
        assert_eq!(
            positions,
            vec![
                Position::new(60, 0),
                Position::new(40, 0),
                Position::new(20, 0)
            ]
        );
        assert_eq!(next.phase, GamePhase::Running);
    }

    #[test]
    fn input_state_is_left_untouched() {
        let state = running_state(&[(40, 0), (20, 0), (0, 0)], Direction::East);
        let before = state.clone();
        let mut rng = StdRng::seed_from_u64(1);

        let _ = step(&state, &mut rng);

        assert_eq!(state, before);
    }

    #[test]
    fn leaving_the_board_ends_the_game() {
        let state = running_state(&[(780, 0), (760, 0), (740, 0)], Direction::East);
        let mut rng = StdRng::seed_from_u64(1);

        let (next, event) = step(&state, &mut rng);

        assert_eq!(event, TickEvent::Collided(Collision::Wall));
        assert_eq!(next.phase, GamePhase::GameOver);
        assert_eq!(next.snake, state.snake);
    }

    #[test]
    fn hitting_an_obstacle_ends_the_game() {
        let mut state = running_state(&[(40, 0), (20, 0), (0, 0)], Direction::East);
        state.obstacles = vec![ObstacleBlock {
            position: Position::new(60, 0),
        }];
        let mut rng = StdRng::seed_from_u64(1);

        let (next, event) = step(&state, &mut rng);

        assert_eq!(event, TickEvent::Collided(Collision::Obstacle));
        assert_eq!(next.death_reason, Some(Collision::Obstacle));
    }

    #[test]
    fn wall_takes_priority_over_other_checks() {
        let mut state = running_state(&[(0, 20), (20, 20), (40, 20)], Direction::West);
        state.obstacles = vec![ObstacleBlock {
            position: Position::new(-20, 20),
        }];
        let mut rng = StdRng::seed_from_u64(1);

        let (_, event) = step(&state, &mut rng);

        assert_eq!(event, TickEvent::Collided(Collision::Wall));
    }

    #[test]
    fn running_into_the_body_ends_the_game_without_moving() {
        let state = running_state(
            &[(40, 40), (40, 60), (60, 60), (60, 40), (60, 20), (40, 20)],
            Direction::East,
        );
        let mut rng = StdRng::seed_from_u64(1);

        let (next, event) = step(&state, &mut rng);

        assert_eq!(event, TickEvent::Collided(Collision::SelfBody));
        assert_eq!(next.snake, state.snake);
    }

    #[test]
    fn eating_grows_scores_and_replaces_the_food() {
        let mut state = running_state(&[(40, 0), (20, 0), (0, 0)], Direction::East);
        state.foods = vec![
            FoodItem::new(Position::new(60, 0), FoodKind::Pear),
            FoodItem::new(Position::new(400, 400), FoodKind::Apple),
        ];
        let mut rng = StdRng::seed_from_u64(1);

        let (next, event) = step(&state, &mut rng);

        assert_eq!(event, TickEvent::Ate(FoodKind::Pear));
        assert_eq!(next.score, 5);
        assert_eq!(next.snake.len(), 4);
        assert_eq!(next.foods.len(), 2);
        assert!(next.snake.head_segment().just_ate);
        assert!(next.food_index_at(Position::new(60, 0)).is_none());
        assert!(!next.snake.occupies(next.foods[1].position));
    }

    #[test]
    fn stone_can_push_the_score_negative() {
        let mut state = running_state(&[(40, 0), (20, 0), (0, 0)], Direction::East);
        state.foods = vec![FoodItem::new(Position::new(60, 0), FoodKind::Stone)];
        let mut rng = StdRng::seed_from_u64(1);

        let (next, _) = step(&state, &mut rng);

        assert_eq!(next.score, -10);
        assert_eq!(next.snake.len(), 4);
    }

    #[test]
    fn medicine_shrinks_but_not_below_three() {
        let mut state = running_state(&[(60, 0), (40, 0), (20, 0), (0, 0)], Direction::East);
        state.foods = vec![FoodItem::new(Position::new(80, 0), FoodKind::Medicine)];
        let mut rng = StdRng::seed_from_u64(1);

        let (next, _) = step(&state, &mut rng);
        assert_eq!(next.snake.len(), 3);
        assert_eq!(next.score, 10);

        let mut short = running_state(&[(40, 0), (20, 0), (0, 0)], Direction::East);
        short.foods = vec![FoodItem::new(Position::new(60, 0), FoodKind::Medicine)];

        let (next, _) = step(&short, &mut rng);
        assert_eq!(next.snake.len(), 3);
        assert_eq!(next.snake.head(), Position::new(60, 0));
    }

    #[test]
    fn just_ate_clears_on_the_following_tick() {
        let mut state = running_state(&[(40, 0), (20, 0), (0, 0)], Direction::East);
        state.foods = vec![FoodItem::new(Position::new(60, 0), FoodKind::Egg)];
        let mut rng = StdRng::seed_from_u64(4);

        let (mut next, _) = step(&state, &mut rng);
        // Keep the replacement out of the way of the next move.
        next.foods = vec![FoodItem::new(Position::new(400, 400), FoodKind::Egg)];
        let (after, event) = step(&next, &mut rng);

        assert_eq!(event, TickEvent::Moved);
        assert!(after.snake.segments().all(|segment| !segment.just_ate));
    }

    #[test]
    fn paused_state_does_not_advance() {
        let mut state = running_state(&[(40, 0), (20, 0), (0, 0)], Direction::East);
        state.phase = GamePhase::Paused;
        let mut rng = StdRng::seed_from_u64(1);

        let (next, event) = step(&state, &mut rng);

        assert_eq!(event, TickEvent::Idle);
        assert_eq!(next, state);
    }

    #[test]
    fn high_score_settles_only_on_improvement() {
        let mut state = running_state(&[(40, 0), (20, 0), (0, 0)], Direction::East);
        state.high_score = Some(8);
        state.score = 12;
        assert_eq!(settle_high_score(&mut state), Some(12));
        assert_eq!(state.high_score, Some(12));

        state.score = 3;
        assert_eq!(settle_high_score(&mut state), None);
        assert_eq!(state.high_score, Some(12));

        state.high_score = None;
        state.score = -4;
        assert_eq!(settle_high_score(&mut state), Some(-4));
    }
}
