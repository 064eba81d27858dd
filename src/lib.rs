//! Grid-based snake: a deterministic game-state engine plus a terminal
//! front end.
//!
//! The core (`geometry`, `direction`, `level`, `food`, `snake`, `game`,
//! `engine`, `controller`) has no I/O. `score` persists per-level high
//! scores; `input`, `renderer`, `ui` and `terminal_runtime` are the
//! terminal collaborators used by the binary.

pub mod config;
pub mod controller;
pub mod direction;
pub mod engine;
pub mod food;
pub mod game;
pub mod geometry;
pub mod input;
pub mod level;
pub mod renderer;
pub mod score;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
