use std::time::{Duration, Instant};

use log::info;
use rand::rngs::StdRng;
use rand::Rng;

use crate::config::{GridGeometry, DEFAULT_FOOD_COUNT, TICK_INTERVAL_MS};
use crate::direction::{next_direction, ArrowKey};
use crate::engine::{settle_high_score, step, TickEvent};
use crate::game::{GamePhase, GameState};
use crate::score::HighScoreStore;

/// One-shot tick deadline, re-armed by the controller after each step.
#[derive(Debug, Clone, Copy)]
pub struct TickTimer {
    interval: Duration,
    next_due: Option<Instant>,
}

impl TickTimer {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    /// Schedules the next tick one interval after `now`.
    pub fn arm(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }

    pub fn disarm(&mut self) {
        self.next_due = None;
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        self.next_due.is_some_and(|due| now >= due)
    }

    /// Time left until the next tick, if armed.
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}

/// Settings fixed for the lifetime of a controller.
#[derive(Debug, Clone, Copy)]
pub struct ControllerSettings {
    pub geometry: GridGeometry,
    pub level: u32,
    pub food_count: usize,
    pub tick_interval: Duration,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            geometry: GridGeometry::default(),
            level: 1,
            food_count: DEFAULT_FOOD_COUNT,
            tick_interval: Duration::from_millis(TICK_INTERVAL_MS),
        }
    }
}

/// Owns the single mutable [`GameState`] and drives its phase machine.
///
/// `NotStarted -> Running <-> Paused`, `Running -> GameOver`, and
/// `restart` returns to `NotStarted`.
#[derive(Debug)]
pub struct GameController<S, R = StdRng> {
    state: GameState,
    store: S,
    rng: R,
    timer: TickTimer,
    settings: ControllerSettings,
}

impl<S: HighScoreStore, R: Rng> GameController<S, R> {
    /// Creates a controller in the `NotStarted` phase at `settings.level`.
    pub fn new(store: S, mut rng: R, settings: ControllerSettings) -> Self {
        let settings = ControllerSettings {
            level: settings.level.max(1),
            ..settings
        };
        let state = fresh_state(&store, &mut rng, settings);

        Self {
            state,
            store,
            rng,
            timer: TickTimer::new(settings.tick_interval),
            settings,
        }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn timer(&self) -> &TickTimer {
        &self.timer
    }

    /// Level used on the next restart.
    #[must_use]
    pub fn selected_level(&self) -> u32 {
        self.settings.level
    }

    /// Begins ticking from the start screen.
    pub fn start(&mut self, now: Instant) {
        if self.state.phase != GamePhase::NotStarted {
            return;
        }

        info!("starting level {}", self.state.level);
        self.state.phase = GamePhase::Running;
        self.timer.arm(now);
    }

    pub fn pause(&mut self) {
        if self.state.phase == GamePhase::Running {
            info!("paused at score {}", self.state.score);
            self.state.phase = GamePhase::Paused;
            self.timer.disarm();
        }
    }

    /// Continues from exactly where `pause` left off.
    pub fn resume(&mut self, now: Instant) {
        if self.state.phase == GamePhase::Paused {
            info!("resumed level {}", self.state.level);
            self.state.phase = GamePhase::Running;
            self.timer.arm(now);
        }
    }

    pub fn toggle_pause(&mut self, now: Instant) {
        match self.state.phase {
            GamePhase::Running => self.pause(),
            GamePhase::Paused => self.resume(now),
            GamePhase::NotStarted | GamePhase::GameOver => {}
        }
    }

    /// Updates the pending heading for the next tick.
    ///
    /// Ignored after game over. A turn that would point the head back into
    /// the neck is dropped even if the pending heading allows it.
    pub fn change_direction(&mut self, key: ArrowKey) {
        if self.state.phase == GamePhase::GameOver {
            return;
        }

        let candidate = next_direction(self.state.direction, key);
        if candidate != self.state.snake.heading().opposite() {
            self.state.direction = candidate;
        }
    }

    /// Runs one simulation step and commits it.
    ///
    /// On game over the level high score is settled and persisted.
    pub fn tick(&mut self) -> TickEvent {
        let (next, event) = step(&self.state, &mut self.rng);
        self.state = next;

        if let TickEvent::Collided(collision) = event {
            self.timer.disarm();
            info!(
                "game over on level {} ({collision:?}), score {}",
                self.state.level, self.state.score
            );
            if let Some(score) = settle_high_score(&mut self.state) {
                info!("new high score {score} for level {}", self.state.level);
                self.store.set_high_score(self.state.level, score);
            }
        }

        event
    }

    /// Fires at most one tick when the timer is due.
    ///
    /// The timer is re-armed from `now` only after the step is committed.
    pub fn poll(&mut self, now: Instant) -> Option<TickEvent> {
        if !self.timer.is_due(now) {
            return None;
        }

        self.timer.disarm();
        let event = self.tick();
        if self.state.is_running() {
            self.timer.arm(now);
        }
        Some(event)
    }

    /// Discards the current game and rebuilds the selected level.
    pub fn restart(&mut self) {
        self.timer.disarm();
        self.state = fresh_state(&self.store, &mut self.rng, self.settings);
        info!("restarted at level {}", self.state.level);
    }

    /// Replaces the current game with a prepared `state`, such as a scripted
    /// board position set up by a test harness. The selected level follows
    /// `state.level`; ticking stops until the next `start` or `resume`.
    pub fn load_state(&mut self, state: GameState) {
        self.timer.disarm();
        self.settings.level = state.level;
        self.state = state;
    }

    /// Switches level. Only allowed before starting or after game over.
    /// Returns whether the level changed.
    pub fn select_level(&mut self, level: u32) -> bool {
        if !matches!(
            self.state.phase,
            GamePhase::NotStarted | GamePhase::GameOver
        ) {
            return false;
        }

        self.settings.level = level.max(1);
        self.restart();
        true
    }
}

fn fresh_state<S: HighScoreStore, R: Rng>(
    store: &S,
    rng: &mut R,
    settings: ControllerSettings,
) -> GameState {
    GameState::new(
        rng,
        settings.geometry,
        settings.level,
        settings.food_count,
        store.high_score(settings.level),
    )
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::{ControllerSettings, GameController, TickTimer};
    use crate::direction::{ArrowKey, Direction};
    use crate::engine::TickEvent;
    use crate::game::GamePhase;
    use crate::score::MemoryScoreStore;

    fn controller() -> GameController<MemoryScoreStore> {
        GameController::new(
            MemoryScoreStore::default(),
            StdRng::seed_from_u64(17),
            ControllerSettings::default(),
        )
    }

    #[test]
    fn timer_fires_once_per_interval() {
        let start = Instant::now();
        let mut timer = TickTimer::new(Duration::from_millis(100));

        assert!(!timer.is_due(start));
        timer.arm(start);
        assert!(!timer.is_due(start + Duration::from_millis(99)));
        assert!(timer.is_due(start + Duration::from_millis(100)));

        timer.disarm();
        assert!(!timer.is_due(start + Duration::from_secs(5)));
    }

    #[test]
    fn ticks_only_run_while_running() {
        let mut controller = controller();
        let now = Instant::now();

        assert_eq!(controller.poll(now + Duration::from_secs(1)), None);
        assert_eq!(controller.tick(), TickEvent::Idle);

        controller.start(now);
        assert_eq!(controller.state().phase, GamePhase::Running);
        assert_eq!(controller.poll(now + Duration::from_millis(50)), None);
        assert!(controller.poll(now + Duration::from_millis(100)).is_some());
        assert!(controller.timer().is_armed());
    }

    #[test]
    fn pause_freezes_state_and_resume_continues() {
        let mut controller = controller();
        let now = Instant::now();
        controller.start(now);
        controller.pause();
        let frozen = controller.state().clone();

        assert_eq!(controller.poll(now + Duration::from_secs(10)), None);
        assert_eq!(controller.state(), &frozen);

        controller.resume(now);
        assert_eq!(controller.state().phase, GamePhase::Running);
        assert!(controller.poll(now + Duration::from_millis(100)).is_some());
    }

    #[test]
    fn pause_and_resume_only_act_in_their_phases() {
        let mut controller = controller();
        let now = Instant::now();

        controller.pause();
        assert_eq!(controller.state().phase, GamePhase::NotStarted);

        controller.start(now);
        controller.resume(now + Duration::from_millis(60));
        assert_eq!(controller.state().phase, GamePhase::Running);
        assert_eq!(
            controller.timer().remaining(now + Duration::from_millis(60)),
            Some(Duration::from_millis(40))
        );

        controller.toggle_pause(now);
        assert_eq!(controller.state().phase, GamePhase::Paused);
        assert!(!controller.timer().is_armed());
        controller.toggle_pause(now);
        assert_eq!(controller.state().phase, GamePhase::Running);
    }

    #[test]
    fn reversal_is_rejected_even_after_a_pending_turn() {
        let mut controller = controller();

        controller.change_direction(ArrowKey::Up);
        assert_eq!(controller.state().direction, Direction::North);

        // West would reverse the still-east-facing head.
        controller.change_direction(ArrowKey::Left);
        assert_eq!(controller.state().direction, Direction::North);
    }

    #[test]
    fn level_selection_is_refused_mid_game() {
        let mut controller = controller();
        assert!(controller.select_level(2));
        assert_eq!(controller.state().level, 2);

        controller.start(Instant::now());
        assert!(!controller.select_level(3));
        assert_eq!(controller.selected_level(), 2);
    }
}
